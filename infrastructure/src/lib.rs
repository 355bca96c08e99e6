//! Infrastructure layer for contextlog
//!
//! This crate contains the concrete backends (console, tracing, memory),
//! tokio channel adapters for context log broadcasting, and console
//! configuration loading.

pub mod backends;
pub mod channels;
pub mod config;
pub mod environment;

// Re-export commonly used types
pub use backends::{
    CONSOLE_BACKEND_ID, ConsoleBackend, ConsoleStream, MemoryBackend, MemoryRecord,
    RenderedLine, TRACING_BACKEND_ID, TracingBackend,
};
pub use channels::{BroadcastPipe, UnboundedPipe};
pub use config::{ConsoleConfig, ConsoleConfigLoader};
pub use environment::{console_environment, default_environment};
