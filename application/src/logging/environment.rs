//! Process-wide logging state: routing table plus the per-path logger cache.

use super::factory::LogFactory;
use super::logger::Logger;
use crate::config::{Route, RoutingError, RoutingTable};
use contextlog_domain::util::{lock_or_recover, read_or_recover, write_or_recover};
use contextlog_domain::{Backend, Level, LoggerContext};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, RwLock};
use tracing::debug;

pub(crate) struct EnvironmentState {
    routing: RwLock<RoutingTable>,
    loggers: Mutex<HashMap<String, Arc<Logger>>>,
}

/// Owns the routing table and the logger cache.
///
/// Construct one at startup and hand clones (cheap, shared) to whatever
/// needs loggers. A logger is resolved against the routing table the first
/// time its path is requested and cached for the lifetime of the
/// environment; routing changes made afterwards only affect paths that
/// have not been requested yet.
#[derive(Clone)]
pub struct LoggingEnvironment {
    state: Arc<EnvironmentState>,
}

impl LoggingEnvironment {
    /// Environment with the default routing table around `default_backend`.
    pub fn new(default_backend: Arc<dyn Backend>) -> Self {
        Self::with_routing(RoutingTable::new(default_backend))
    }

    pub fn with_routing(routing: RoutingTable) -> Self {
        Self {
            state: Arc::new(EnvironmentState {
                routing: RwLock::new(routing),
                loggers: Mutex::new(HashMap::new()),
            }),
        }
    }

    pub(crate) fn from_state(state: Arc<EnvironmentState>) -> Self {
        Self { state }
    }

    // ==================== Routing ====================

    pub fn set_path(&self, path: impl Into<String>, level: Level) {
        write_or_recover(&self.state.routing).set_path(path, level)
    }

    pub fn set_path_on(&self, route_id: &str, path: impl Into<String>, level: Level) {
        write_or_recover(&self.state.routing).set_path_on(route_id, path, level)
    }

    pub fn try_set_path_on(
        &self,
        route_id: &str,
        path: impl Into<String>,
        level: Level,
    ) -> Result<(), RoutingError> {
        write_or_recover(&self.state.routing).try_set_path_on(route_id, path, level)
    }

    pub fn set_backend(&self, backend: Arc<dyn Backend>, level: Level) {
        write_or_recover(&self.state.routing).set_backend(backend, level)
    }

    pub fn set_backend_on(&self, route_id: &str, backend: Arc<dyn Backend>, level: Level) {
        write_or_recover(&self.state.routing).set_backend_on(route_id, backend, level)
    }

    pub fn try_set_backend_on(
        &self,
        route_id: &str,
        backend: Arc<dyn Backend>,
        level: Level,
    ) -> Result<(), RoutingError> {
        write_or_recover(&self.state.routing).try_set_backend_on(route_id, backend, level)
    }

    pub fn set_route_level(&self, level: Level) {
        write_or_recover(&self.state.routing).set_route_level(level)
    }

    pub fn set_route_level_on(&self, route_id: &str, level: Level) {
        write_or_recover(&self.state.routing).set_route_level_on(route_id, level)
    }

    pub fn try_set_route_level_on(&self, route_id: &str, level: Level) -> Result<(), RoutingError> {
        write_or_recover(&self.state.routing).try_set_route_level_on(route_id, level)
    }

    pub fn add_route(&self, id: impl Into<String>, level: Level) -> Result<(), RoutingError> {
        write_or_recover(&self.state.routing).add_route(id, level)
    }

    /// Copy of the routing table; changing it does not affect the environment.
    pub fn get_routing(&self) -> Vec<Route> {
        read_or_recover(&self.state.routing).snapshot()
    }

    // ==================== Loggers ====================

    /// The logger bound to `path`, resolving and caching it on first use.
    pub fn logger(&self, path: &str) -> Arc<Logger> {
        self.logger_for(LoggerContext::new(path))
    }

    /// Like [`logger`](Self::logger), with extra context fields. Fields only
    /// apply if this call constructs the logger.
    pub fn logger_for(&self, context: LoggerContext) -> Arc<Logger> {
        let mut loggers = lock_or_recover(&self.state.loggers);
        if let Some(logger) = loggers.get(&context.path) {
            debug!(logger = %context.path, "Using cached logger");
            return Arc::clone(logger);
        }

        debug!(logger = %context.path, "Constructing logger");
        let backends = read_or_recover(&self.state.routing).resolve(&context.path);
        let path = context.path.clone();
        let logger = Arc::new(Logger::new(
            context,
            backends,
            Arc::downgrade(&self.state),
        ));
        loggers.insert(path, Arc::clone(&logger));
        logger
    }

    /// Factory at the root path `""`.
    pub fn log_factory(&self) -> LogFactory {
        LogFactory::new(self.clone(), LoggerContext::new(""))
    }

    /// Paths with a constructed logger, sorted.
    pub fn cached_paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = lock_or_recover(&self.state.loggers)
            .keys()
            .cloned()
            .collect();
        paths.sort();
        paths
    }
}

impl fmt::Debug for LoggingEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggingEnvironment")
            .field("routes", &self.get_routing())
            .field("cached_paths", &self.cached_paths())
            .finish()
    }
}
