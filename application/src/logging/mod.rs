//! Loggers and the environment that builds them.
//!
//! # Data Flow
//! ```text
//! LogFactory::get_child_logger("editor")
//!     → LoggingEnvironment::logger_for("/editor")
//!         → cache hit: same Arc<Logger>
//!         → cache miss: RoutingTable::resolve("/editor") → Logger → cache
//!
//! Logger::warning("saved {0}", args)
//!     → per-level dispatch table (precomputed)
//!     → every admitting Backend::log(..)
//! ```

pub mod environment;
pub mod factory;
pub mod logger;

#[cfg(test)]
pub(crate) mod test_support;

pub use environment::LoggingEnvironment;
pub use factory::LogFactory;
pub use logger::Logger;
