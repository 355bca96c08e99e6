//! Application layer for contextlog
//!
//! This crate contains the routing table, the logging environment that
//! caches one logger per path, and the loggers and factories built on it.
//! It depends only on the domain layer.

pub mod config;
pub mod logging;

// Re-export commonly used types
pub use config::{BackendWithLevel, DEFAULT_ROUTE_ID, PathLevel, Route, RoutingError, RoutingTable};
pub use logging::{LogFactory, Logger, LoggingEnvironment};
