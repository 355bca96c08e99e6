//! Tokio channel adapters for [`LogChannel`](contextlog_domain::LogChannel) pipes.
//!
//! Publishing never blocks and never fails the logging call: messages sent
//! while nobody is listening are dropped.

use contextlog_domain::LogPipe;
use tokio::sync::{broadcast, mpsc};
use tracing::trace;

/// Pipe publishing to every subscriber of a tokio broadcast channel.
#[derive(Debug, Clone)]
pub struct BroadcastPipe<T> {
    sender: broadcast::Sender<T>,
}

impl<T: Clone + Send + 'static> BroadcastPipe<T> {
    /// Pipe over a new channel buffering up to `capacity` messages per subscriber.
    pub fn channel(capacity: usize) -> (Self, broadcast::Receiver<T>) {
        let (sender, receiver) = broadcast::channel(capacity);
        (Self { sender }, receiver)
    }

    pub fn from_sender(sender: broadcast::Sender<T>) -> Self {
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<T> {
        self.sender.subscribe()
    }

    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl<T: Clone + Send + 'static> LogPipe<T> for BroadcastPipe<T> {
    fn publish(&self, message: T) {
        if self.sender.send(message).is_err() {
            trace!("No broadcast subscriber, dropping log");
        }
    }
}

/// Pipe feeding a single consumer through an unbounded mpsc channel.
#[derive(Debug, Clone)]
pub struct UnboundedPipe<T> {
    sender: mpsc::UnboundedSender<T>,
}

impl<T: Send + 'static> UnboundedPipe<T> {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<T>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }

    pub fn from_sender(sender: mpsc::UnboundedSender<T>) -> Self {
        Self { sender }
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

impl<T: Send + 'static> LogPipe<T> for UnboundedPipe<T> {
    fn publish(&self, message: T) {
        if self.sender.send(message).is_err() {
            trace!("Receiver dropped, dropping log");
        }
    }
}
