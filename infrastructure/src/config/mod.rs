//! Console configuration loading for contextlog
//!
//! The priority order (highest to lowest):
//!
//! 1. `CONTEXTLOG_CONSOLE_*` environment variables
//! 2. An explicit TOML file
//! 3. Default values
//!
//! Routing itself is configured programmatically on the
//! [`LoggingEnvironment`](contextlog_application::LoggingEnvironment).

mod console_config;
mod loader;

pub use console_config::ConsoleConfig;
pub use loader::{ConsoleConfigLoader, ENV_PREFIX};
