//! Ready-made logging environment backed by the console.

use crate::backends::ConsoleBackend;
use crate::config::{ConsoleConfig, ConsoleConfigLoader};
use contextlog_application::LoggingEnvironment;
use std::path::Path;
use std::sync::Arc;
use tracing::warn;

/// Environment whose default route prints to the console, configured from
/// defaults and `CONTEXTLOG_CONSOLE_*` variables.
pub fn default_environment() -> LoggingEnvironment {
    console_environment(None)
}

/// Like [`default_environment`], also reading console options from `config_path`.
pub fn console_environment(config_path: Option<&Path>) -> LoggingEnvironment {
    let config = ConsoleConfigLoader::load(config_path).unwrap_or_else(|e| {
        warn!("Invalid console configuration, using defaults: {}", e);
        ConsoleConfig::default()
    });
    LoggingEnvironment::new(Arc::new(ConsoleBackend::new(config)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::CONSOLE_BACKEND_ID;
    use contextlog_application::DEFAULT_ROUTE_ID;
    use contextlog_domain::Level;
    use std::io::Write;

    #[test]
    fn test_default_environment_routes_to_console() {
        let env = default_environment();
        let routes = env.get_routing();
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].id, DEFAULT_ROUTE_ID);
        assert_eq!(routes[0].backends_levels[0].id(), CONSOLE_BACKEND_ID);
        assert!(env.logger("/any").admits(Level::Debug));
    }

    #[test]
    fn test_invalid_config_falls_back_to_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "timestamps = 3").unwrap();
        let env = console_environment(Some(file.path()));
        assert_eq!(env.get_routing()[0].backends_levels.len(), 1);
    }
}
