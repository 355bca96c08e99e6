//! Domain layer for contextlog
//!
//! This crate contains the vocabulary shared by every layer: severity
//! levels, message arguments and the backend contract, plus the
//! execution-context tree. It performs no I/O.
//!
//! # Core Concepts
//!
//! ## Leveled logging
//!
//! - **Level**: `debug < info < notice < warning < error < fatal < alert`
//! - **Backend**: a sink receiving `(level, template, args, logger context)`
//! - **MessageArg**: literal, lazy or wrapped positional arguments
//!
//! ## Execution contexts
//!
//! - **Context**: one nested execution scope with timing, derived status
//!   and children
//! - **Log**: an info, warning or error entry of a context
//! - **LogChannel**: filtered, mapped broadcast of logs to observers
//! - **Journal**: titled pages of context trees, for viewers

pub mod context;
pub mod core;
pub mod journal;
pub mod logging;
pub mod util;

// Re-export commonly used types
pub use context::{
    ChildScope, Context, ContextEntry, ContextLogger, ContextOptions, ContextReport,
    ContextStatus, EntryReport, ErrorRecord, Log, LogChannel, LogDispatch, LogKind, LogPipe,
    LogReport, NoContext, ScopeFuture, UserContext,
};
pub use core::{
    clock::{Clock, ManualClock, MonotonicClock},
    error::{ScopedError, TraceError},
    level::Level,
};
pub use journal::{DataView, Journal, JournalReport, Page, PageReport, select_view};
pub use logging::{ArgOptions, Backend, LoggerContext, MessageArg, PreparedMessage, prepare_message};
