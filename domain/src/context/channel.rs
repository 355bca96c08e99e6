//! Broadcasting of context logs to external observers.
//!
//! A [`LogChannel`] is attached to a root [`Context`](super::Context) and
//! shared by every descendant. Each log appended anywhere in the tree is
//! offered to the channel; logs accepted by the filter are mapped and
//! published to every pipe, synchronously, inside the logging call.

use super::log::Log;
use std::fmt;
use std::sync::Arc;

/// Downstream target of a channel.
///
/// Implemented for closures; `contextlog-infrastructure` provides tokio
/// channel adapters.
pub trait LogPipe<T>: Send + Sync {
    fn publish(&self, message: T);
}

impl<T, F> LogPipe<T> for F
where
    F: Fn(T) + Send + Sync,
{
    fn publish(&self, message: T) {
        self(message)
    }
}

/// Type-erased channel, as stored by the context tree.
pub trait LogDispatch: Send + Sync {
    fn dispatch(&self, log: &Arc<Log>);
}

type Filter = Box<dyn Fn(&Log) -> bool + Send + Sync>;
type Mapper<T> = Box<dyn Fn(&Arc<Log>) -> T + Send + Sync>;

/// Filtered, mapped fan-out of logs to a list of pipes.
pub struct LogChannel<T> {
    filter: Filter,
    map: Mapper<T>,
    pipes: Vec<Arc<dyn LogPipe<T>>>,
}

impl LogChannel<Arc<Log>> {
    /// Channel publishing the accepted logs themselves.
    pub fn new(filter: impl Fn(&Log) -> bool + Send + Sync + 'static) -> Self {
        Self::mapped(filter, |log: &Arc<Log>| Arc::clone(log))
    }
}

impl<T> LogChannel<T> {
    /// Channel publishing `map(log)` for every accepted log.
    pub fn mapped(
        filter: impl Fn(&Log) -> bool + Send + Sync + 'static,
        map: impl Fn(&Arc<Log>) -> T + Send + Sync + 'static,
    ) -> Self {
        Self {
            filter: Box::new(filter),
            map: Box::new(map),
            pipes: Vec::new(),
        }
    }

    pub fn with_pipe(mut self, pipe: impl LogPipe<T> + 'static) -> Self {
        self.pipes.push(Arc::new(pipe));
        self
    }

    pub fn with_shared_pipe(mut self, pipe: Arc<dyn LogPipe<T>>) -> Self {
        self.pipes.push(pipe);
        self
    }

    pub fn pipe_count(&self) -> usize {
        self.pipes.len()
    }

    /// Publish `map(log)` to every pipe if the filter accepts `log`.
    pub fn dispatch(&self, log: &Arc<Log>) {
        if !(self.filter)(log.as_ref()) {
            return;
        }
        for pipe in &self.pipes {
            pipe.publish((self.map)(log));
        }
    }
}

impl<T> LogDispatch for LogChannel<T> {
    fn dispatch(&self, log: &Arc<Log>) {
        LogChannel::dispatch(self, log)
    }
}

impl<T> fmt::Debug for LogChannel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogChannel")
            .field("pipes", &self.pipes.len())
            .finish_non_exhaustive()
    }
}
