//! Routing table: which backends receive which severities, per path.
//!
//! # Resolution
//!
//! For a logger path `P`, every route contributes its backends:
//!
//! 1. Among the route's path entries whose `path` is a (raw text) prefix of
//!    `P`, the longest wins. Ties go to the entry added last, so
//!    `set_path("/", Level::Info)` overrides the seeded `/` entry.
//! 2. The effective route level is the stricter of the route's base level
//!    and the matched entry's level (the base level alone if nothing
//!    matched).
//! 3. Each backend's effective level is the stricter of the route level and
//!    the backend's own level.
//!
//! Contributions are concatenated across routes without de-duplication.

use contextlog_domain::{Backend, Level};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Identifier of the route every table starts with.
pub const DEFAULT_ROUTE_ID: &str = "default_route";

/// Routing configuration errors, reported by the strict `try_*` mutators.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RoutingError {
    #[error("Unknown route: {0}")]
    UnknownRoute(String),

    #[error("Route already exists: {0}")]
    DuplicateRoute(String),
}

/// A backend and the level from which it receives calls.
#[derive(Clone)]
pub struct BackendWithLevel {
    pub backend: Arc<dyn Backend>,
    pub level: Level,
}

impl BackendWithLevel {
    pub fn new(backend: Arc<dyn Backend>, level: Level) -> Self {
        Self { backend, level }
    }

    pub fn id(&self) -> &str {
        self.backend.id()
    }
}

impl fmt::Debug for BackendWithLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendWithLevel")
            .field("backend", &self.backend.id())
            .field("level", &self.level)
            .finish()
    }
}

/// Level override for loggers whose path starts with `path`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathLevel {
    pub path: String,
    pub level: Level,
}

impl PathLevel {
    pub fn new(path: impl Into<String>, level: Level) -> Self {
        Self {
            path: path.into(),
            level,
        }
    }
}

/// A named routing policy.
#[derive(Debug, Clone)]
pub struct Route {
    pub id: String,
    pub level: Level,
    pub backends_levels: Vec<BackendWithLevel>,
    pub paths: Vec<PathLevel>,
}

impl Route {
    /// Route without backends, with a catch-all `""` path entry.
    pub fn new(id: impl Into<String>, level: Level) -> Self {
        Self {
            id: id.into(),
            level,
            backends_levels: Vec::new(),
            paths: vec![PathLevel::new("", Level::Debug)],
        }
    }

    /// Longest path entry prefixing `path`; the last added wins ties.
    pub fn matching_path(&self, path: &str) -> Option<&PathLevel> {
        let mut best: Option<&PathLevel> = None;
        for candidate in self
            .paths
            .iter()
            .filter(|candidate| path.starts_with(candidate.path.as_str()))
        {
            if best.is_none_or(|current| candidate.path.len() >= current.path.len()) {
                best = Some(candidate);
            }
        }
        best
    }

    /// Level of this route for loggers at `path`.
    pub fn effective_level(&self, path: &str) -> Level {
        match self.matching_path(path) {
            Some(matched) => self.level.stricter(matched.level),
            None => self.level,
        }
    }

    /// This route's backends with their effective levels at `path`.
    pub fn resolve(&self, path: &str) -> Vec<BackendWithLevel> {
        let matched = self.matching_path(path);
        debug!(
            logger = path,
            route = %self.id,
            path_prefix = matched.map(|m| m.path.as_str()),
            path_level = ?matched.map(|m| m.level),
            route_level = %self.level,
            "Matched route path"
        );

        let route_level = self.effective_level(path);
        self.backends_levels
            .iter()
            .map(|backend_level| {
                let level = route_level.stricter(backend_level.level);
                debug!(
                    logger = path,
                    route = %self.id,
                    backend = backend_level.id(),
                    %level,
                    "Adding backend"
                );
                BackendWithLevel::new(Arc::clone(&backend_level.backend), level)
            })
            .collect()
    }
}

/// The routes consulted when a logger is constructed.
///
/// Lenient mutators (`set_*`) ignore unknown route ids with a warning so
/// that logging configuration never fails the host; the `try_*` variants
/// report them instead.
#[derive(Debug, Clone)]
pub struct RoutingTable {
    routes: Vec<Route>,
}

impl RoutingTable {
    /// Table with `default_route`: base level `debug`, `default_backend` at
    /// `debug`, and a `/` path entry at `debug`.
    pub fn new(default_backend: Arc<dyn Backend>) -> Self {
        let default_route = Route {
            id: DEFAULT_ROUTE_ID.to_string(),
            level: Level::Debug,
            backends_levels: vec![BackendWithLevel::new(default_backend, Level::Debug)],
            paths: vec![PathLevel::new("/", Level::Debug)],
        };
        Self {
            routes: vec![default_route],
        }
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn route(&self, id: &str) -> Option<&Route> {
        self.routes.iter().find(|route| route.id == id)
    }

    fn route_mut(&mut self, id: &str) -> Result<&mut Route, RoutingError> {
        self.routes
            .iter_mut()
            .find(|route| route.id == id)
            .ok_or_else(|| RoutingError::UnknownRoute(id.to_string()))
    }

    /// Add an empty route (see [`Route::new`]).
    pub fn add_route(&mut self, id: impl Into<String>, level: Level) -> Result<(), RoutingError> {
        let id = id.into();
        if self.route(&id).is_some() {
            return Err(RoutingError::DuplicateRoute(id));
        }
        self.routes.push(Route::new(id, level));
        Ok(())
    }

    /// Add a path override to the default route.
    pub fn set_path(&mut self, path: impl Into<String>, level: Level) {
        self.set_path_on(DEFAULT_ROUTE_ID, path, level)
    }

    pub fn set_path_on(&mut self, route_id: &str, path: impl Into<String>, level: Level) {
        lenient(self.try_set_path_on(route_id, path, level));
    }

    pub fn try_set_path_on(
        &mut self,
        route_id: &str,
        path: impl Into<String>,
        level: Level,
    ) -> Result<(), RoutingError> {
        self.route_mut(route_id)?
            .paths
            .push(PathLevel::new(path, level));
        Ok(())
    }

    /// Add a backend to the default route.
    pub fn set_backend(&mut self, backend: Arc<dyn Backend>, level: Level) {
        self.set_backend_on(DEFAULT_ROUTE_ID, backend, level)
    }

    pub fn set_backend_on(&mut self, route_id: &str, backend: Arc<dyn Backend>, level: Level) {
        lenient(self.try_set_backend_on(route_id, backend, level));
    }

    pub fn try_set_backend_on(
        &mut self,
        route_id: &str,
        backend: Arc<dyn Backend>,
        level: Level,
    ) -> Result<(), RoutingError> {
        self.route_mut(route_id)?
            .backends_levels
            .push(BackendWithLevel::new(backend, level));
        Ok(())
    }

    /// Overwrite the base level of the default route.
    pub fn set_route_level(&mut self, level: Level) {
        self.set_route_level_on(DEFAULT_ROUTE_ID, level)
    }

    pub fn set_route_level_on(&mut self, route_id: &str, level: Level) {
        lenient(self.try_set_route_level_on(route_id, level));
    }

    pub fn try_set_route_level_on(
        &mut self,
        route_id: &str,
        level: Level,
    ) -> Result<(), RoutingError> {
        self.route_mut(route_id)?.level = level;
        Ok(())
    }

    /// Independent copy of every route.
    pub fn snapshot(&self) -> Vec<Route> {
        self.routes.clone()
    }

    /// Backends and effective levels for a logger at `path`.
    pub fn resolve(&self, path: &str) -> Vec<BackendWithLevel> {
        self.routes
            .iter()
            .flat_map(|route| route.resolve(path))
            .collect()
    }
}

fn lenient(result: Result<(), RoutingError>) {
    if let Err(error) = result {
        warn!("Ignoring routing change: {}", error);
    }
}
