//! Execution-context tree.
//!
//! A tree of [`Context`] nodes records nested execution scopes of one
//! logical operation, with timing, derived status and [`Log`] entries.
//!
//! # Scenarios
//!
//! - **Synchronous**: [`Context::with_child`] creates a child, runs the
//!   callback and ends the child; an `Err` is recorded on the child and
//!   returned unchanged.
//! - **Asynchronous**: [`Context::with_child_async`] does the same around a
//!   future; [`Context::start_child`] hands the lifecycle to the caller, who
//!   must call [`Context::end`].
//!
//! # Example
//!
//! ```
//! use contextlog_domain::context::{Context, ContextStatus};
//! use contextlog_domain::TraceError;
//!
//! let root = Context::new("load project");
//! let result: Result<(), TraceError> = root.with_child("read manifest", |ctx| {
//!     ctx.info("manifest found");
//!     Err(TraceError::failed("missing field `name`"))
//! });
//! assert!(result.is_err());
//! root.end();
//! assert_eq!(root.status(), ContextStatus::Failed);
//! ```

pub mod channel;
pub mod log;
pub mod node;
pub mod report;
pub mod scope;

pub use channel::{LogChannel, LogDispatch, LogPipe};
pub use log::{ErrorRecord, Log, LogKind};
pub use node::{Context, ContextEntry, ContextOptions, ContextStatus, UserContext};
pub use report::{ContextReport, EntryReport, LogReport};
pub use scope::{ChildScope, ContextLogger, NoContext, ScopeFuture};
