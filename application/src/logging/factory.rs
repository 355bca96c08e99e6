//! Path-scoped logger factory.

use super::environment::LoggingEnvironment;
use super::logger::Logger;
use contextlog_domain::LoggerContext;
use std::sync::Arc;

/// Hands out loggers below a fixed path.
///
/// Factories are cheap to clone and carry context fields that are copied
/// into every logger they construct.
#[derive(Clone, Debug)]
pub struct LogFactory {
    environment: LoggingEnvironment,
    context: LoggerContext,
}

impl LogFactory {
    pub(crate) fn new(environment: LoggingEnvironment, context: LoggerContext) -> Self {
        Self {
            environment,
            context,
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context = self.context.with_field(key, value);
        self
    }

    pub fn path(&self) -> &str {
        &self.context.path
    }

    pub fn context(&self) -> &LoggerContext {
        &self.context
    }

    pub fn environment(&self) -> &LoggingEnvironment {
        &self.environment
    }

    pub fn get_child_logger(&self, name: &str) -> Arc<Logger> {
        self.environment.logger_for(self.context.child(name))
    }

    /// Factory one segment deeper; no logger is constructed.
    pub fn get_child_factory(&self, name: &str) -> LogFactory {
        LogFactory::new(self.environment.clone(), self.context.child(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::test_support::RecordingBackend;
    use contextlog_domain::Level;

    #[test]
    fn test_factory_paths_compose() {
        let env = LoggingEnvironment::new(Arc::new(RecordingBackend::new("console")));
        let root = env.log_factory();
        assert_eq!(root.path(), "");

        let editor = root.get_child_factory("editor");
        assert_eq!(editor.path(), "/editor");
        assert!(env.cached_paths().is_empty());

        let toolbar = editor.get_child_logger("toolbar");
        assert_eq!(toolbar.path(), "/editor/toolbar");
        assert!(Arc::ptr_eq(&toolbar, &env.logger("/editor/toolbar")));
    }

    #[test]
    fn test_fields_reach_loggers_and_their_children() {
        let backend = Arc::new(RecordingBackend::new("console"));
        let env = LoggingEnvironment::new(backend.clone());
        let factory = env.log_factory().with_field("app", "editor");

        let logger = factory.get_child_factory("ui").get_child_logger("panel");
        assert_eq!(logger.context().fields.get("app").map(String::as_str), Some("editor"));

        let child = logger.get_child_logger("button");
        assert_eq!(child.path(), "/ui/panel/button");
        assert_eq!(child.context().fields.get("app").map(String::as_str), Some("editor"));

        child.notice("clicked", &[]);
        assert_eq!(backend.records()[0].path, "/ui/panel/button");
        assert_eq!(backend.records()[0].level, Level::Notice);
    }

    #[test]
    fn test_first_construction_keeps_its_fields() {
        let env = LoggingEnvironment::new(Arc::new(RecordingBackend::new("console")));
        let plain = env.log_factory().get_child_logger("shared");
        let tagged = env
            .log_factory()
            .with_field("k", "v")
            .get_child_logger("shared");
        assert!(Arc::ptr_eq(&plain, &tagged));
        assert!(tagged.context().fields.is_empty());
    }
}
