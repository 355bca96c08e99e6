//! Per-path logger fanning out admitted calls to its backends.

use super::environment::{EnvironmentState, LoggingEnvironment};
use crate::config::BackendWithLevel;
use contextlog_domain::util::{read_or_recover, write_or_recover};
use contextlog_domain::{Backend, Level, LoggerContext, MessageArg};
use std::fmt;
use std::sync::{Arc, RwLock, Weak};
use tracing::debug;

const LEVEL_COUNT: usize = Level::EMITTABLE.len();

struct LoggerState {
    backends: Vec<BackendWithLevel>,
    /// Backends admitting each emittable level, indexed by `Level::index`.
    dispatch: [Vec<Arc<dyn Backend>>; LEVEL_COUNT],
}

impl LoggerState {
    fn new(backends: Vec<BackendWithLevel>) -> Self {
        let mut state = Self {
            backends,
            dispatch: Default::default(),
        };
        state.rebuild_dispatch();
        state
    }

    fn rebuild_dispatch(&mut self) {
        for (index, level) in Level::EMITTABLE.into_iter().enumerate() {
            self.dispatch[index] = self
                .backends
                .iter()
                .filter(|backend_level| backend_level.level.admits(level))
                .map(|backend_level| Arc::clone(&backend_level.backend))
                .collect();
        }
    }
}

/// Logger bound to one path.
///
/// Obtained from a [`LoggingEnvironment`] or a [`LogFactory`](super::LogFactory);
/// one instance exists per path, so changes made through the mutators are
/// seen by every holder of that path's logger. Logging never fails: a call
/// that no backend admits returns without resolving any argument.
pub struct Logger {
    context: LoggerContext,
    state: RwLock<LoggerState>,
    environment: Weak<EnvironmentState>,
}

impl Logger {
    pub(crate) fn new(
        context: LoggerContext,
        backends: Vec<BackendWithLevel>,
        environment: Weak<EnvironmentState>,
    ) -> Self {
        Self {
            context,
            state: RwLock::new(LoggerState::new(backends)),
            environment,
        }
    }

    pub fn path(&self) -> &str {
        &self.context.path
    }

    pub fn context(&self) -> &LoggerContext {
        &self.context
    }

    /// Current backends with their effective levels.
    pub fn backends(&self) -> Vec<BackendWithLevel> {
        read_or_recover(&self.state).backends.clone()
    }

    /// Whether at least one backend receives calls at `level`.
    pub fn admits(&self, level: Level) -> bool {
        level
            .index()
            .is_some_and(|index| !read_or_recover(&self.state).dispatch[index].is_empty())
    }

    pub fn log(&self, level: Level, message: &str, args: &[MessageArg<'_>]) {
        let Some(index) = level.index() else {
            return;
        };
        let targets = {
            let state = read_or_recover(&self.state);
            if state.dispatch[index].is_empty() {
                return;
            }
            state.dispatch[index].clone()
        };
        for backend in &targets {
            backend.log(level, message, args, &self.context);
        }
    }

    pub fn debug(&self, message: &str, args: &[MessageArg<'_>]) {
        self.log(Level::Debug, message, args)
    }

    pub fn info(&self, message: &str, args: &[MessageArg<'_>]) {
        self.log(Level::Info, message, args)
    }

    pub fn notice(&self, message: &str, args: &[MessageArg<'_>]) {
        self.log(Level::Notice, message, args)
    }

    pub fn warning(&self, message: &str, args: &[MessageArg<'_>]) {
        self.log(Level::Warning, message, args)
    }

    pub fn error(&self, message: &str, args: &[MessageArg<'_>]) {
        self.log(Level::Error, message, args)
    }

    pub fn fatal(&self, message: &str, args: &[MessageArg<'_>]) {
        self.log(Level::Fatal, message, args)
    }

    pub fn alert(&self, message: &str, args: &[MessageArg<'_>]) {
        self.log(Level::Alert, message, args)
    }

    /// Add a backend, or change the level of the backend with the same id.
    pub fn set_backend(&self, backend_level: BackendWithLevel) {
        let mut state = write_or_recover(&self.state);
        match state
            .backends
            .iter_mut()
            .find(|current| current.id() == backend_level.id())
        {
            Some(current) => current.level = backend_level.level,
            None => state.backends.push(backend_level),
        }
        state.rebuild_dispatch();
    }

    /// Change the level of backend `id`. Returns `false` if it is not attached.
    pub fn set_level(&self, id: &str, level: Level) -> bool {
        let mut state = write_or_recover(&self.state);
        let Some(current) = state.backends.iter_mut().find(|current| current.id() == id) else {
            return false;
        };
        current.level = level;
        state.rebuild_dispatch();
        true
    }

    /// Detach backend `id`. Returns `false` if it was not attached.
    pub fn remove_backend(&self, id: &str) -> bool {
        let mut state = write_or_recover(&self.state);
        let before = state.backends.len();
        state.backends.retain(|current| current.id() != id);
        let removed = state.backends.len() != before;
        if removed {
            state.rebuild_dispatch();
        }
        removed
    }

    /// Logger at `path + "/" + name`, resolved and cached like any other path.
    pub fn get_child_logger(&self, name: &str) -> Arc<Logger> {
        let child = self.context.child(name);
        match self.environment.upgrade() {
            Some(state) => LoggingEnvironment::from_state(state).logger_for(child),
            None => {
                debug!(logger = %child.path, "Environment dropped, child logger is inert");
                Arc::new(Logger::new(child, Vec::new(), Weak::new()))
            }
        }
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("path", &self.context.path)
            .field("backends", &self.backends())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::test_support::RecordingBackend;
    use serde_json::json;
    use std::cell::Cell;

    fn logger_with(backends: Vec<BackendWithLevel>) -> Logger {
        Logger::new(LoggerContext::new("/test"), backends, Weak::new())
    }

    #[test]
    fn test_fan_out_respects_levels() {
        let verbose = Arc::new(RecordingBackend::new("verbose"));
        let strict = Arc::new(RecordingBackend::new("strict"));
        let logger = logger_with(vec![
            BackendWithLevel::new(verbose.clone(), Level::Debug),
            BackendWithLevel::new(strict.clone(), Level::Warning),
        ]);

        logger.debug("d", &[]);
        logger.notice("n", &[]);
        logger.warning("w", &[]);
        logger.alert("a", &[]);

        assert_eq!(verbose.messages(), vec!["d", "n", "w", "a"]);
        assert_eq!(strict.messages(), vec!["w", "a"]);
        assert_eq!(strict.records()[0].path, "/test");
        assert_eq!(strict.records()[0].level, Level::Warning);
    }

    #[test]
    fn test_rejected_call_never_resolves_lazy_args() {
        let backend = Arc::new(RecordingBackend::new("b"));
        let logger = logger_with(vec![BackendWithLevel::new(backend.clone(), Level::Warning)]);
        let evaluations = Cell::new(0);
        let expensive = || {
            MessageArg::lazy(|| {
                evaluations.set(evaluations.get() + 1);
                json!("costly")
            })
        };

        logger.debug("{0}", &[expensive()]);
        logger.info("{0}", &[expensive()]);
        assert_eq!(evaluations.get(), 0);
        assert!(backend.records().is_empty());

        logger.error("{0}", &[expensive()]);
        assert_eq!(evaluations.get(), 1);
        assert_eq!(backend.messages(), vec!["costly"]);
    }

    #[test]
    fn test_set_backend_adds_then_relevels() {
        let backend = Arc::new(RecordingBackend::new("b"));
        let logger = logger_with(Vec::new());
        assert!(!logger.admits(Level::Alert));

        logger.set_backend(BackendWithLevel::new(backend.clone(), Level::Error));
        assert!(logger.admits(Level::Error));
        assert!(!logger.admits(Level::Warning));

        logger.set_backend(BackendWithLevel::new(backend.clone(), Level::Info));
        assert_eq!(logger.backends().len(), 1);
        assert!(logger.admits(Level::Info));

        logger.info("now visible", &[]);
        assert_eq!(backend.messages(), vec!["now visible"]);
    }

    #[test]
    fn test_set_level_and_remove_backend() {
        let backend = Arc::new(RecordingBackend::new("b"));
        let logger = logger_with(vec![BackendWithLevel::new(backend.clone(), Level::Debug)]);

        assert!(logger.set_level("b", Level::Fatal));
        assert!(!logger.admits(Level::Error));
        assert!(logger.admits(Level::Fatal));
        assert!(!logger.set_level("unknown", Level::Debug));

        assert!(logger.remove_backend("b"));
        assert!(!logger.remove_backend("b"));
        logger.alert("dropped", &[]);
        assert!(backend.records().is_empty());
    }

    #[test]
    fn test_muted_is_never_emitted() {
        let backend = Arc::new(RecordingBackend::new("b"));
        let logger = logger_with(vec![BackendWithLevel::new(backend.clone(), Level::Debug)]);
        logger.log(Level::Muted, "nothing", &[]);
        assert!(!logger.admits(Level::Muted));
        assert!(backend.records().is_empty());
    }

    #[test]
    fn test_detached_logger_children_are_inert() {
        let logger = logger_with(Vec::new());
        let child = logger.get_child_logger("child");
        assert_eq!(child.path(), "/test/child");
        assert!(child.backends().is_empty());
    }
}
