//! Logging contracts shared by loggers and backends.
//!
//! # Key Types
//!
//! - [`Backend`] - A sink receiving admitted log calls
//! - [`LoggerContext`] - The path (and extra fields) a logger is bound to
//! - [`MessageArg`] - A positional argument of a message template
//! - [`PreparedMessage`] - A template with its arguments substituted

pub mod backend;
pub mod message;

pub use backend::{Backend, LoggerContext};
pub use message::{ArgOptions, MessageArg, PreparedMessage, prepare_message};
