//! Backend implementations.
//!
//! - [`ConsoleBackend`]: one line per call on stdout/stderr
//! - [`TracingBackend`]: forwards calls to `tracing` events
//! - [`MemoryBackend`]: keeps calls in memory

mod console;
mod memory;
mod tracing_backend;

pub use console::{CONSOLE_BACKEND_ID, ConsoleBackend, ConsoleStream, RenderedLine};
pub use memory::{MemoryBackend, MemoryRecord};
pub use tracing_backend::{TRACING_BACKEND_ID, TracingBackend, tracing_level};
