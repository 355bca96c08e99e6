//! Backend contract

use super::message::MessageArg;
use crate::core::level::Level;
use std::collections::BTreeMap;

/// Identity of a logger, handed to backends with every call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoggerContext {
    /// Hierarchical, slash separated path (e.g. `/app/editor/toolbar`).
    pub path: String,
    /// Extra fields inherited from the factory that produced the logger.
    pub fields: BTreeMap<String, String>,
}

impl LoggerContext {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            fields: BTreeMap::new(),
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Context of the child named `name`: same fields, path `path + "/" + name`.
    pub fn child(&self, name: &str) -> Self {
        Self {
            path: format!("{}/{}", self.path, name),
            fields: self.fields.clone(),
        }
    }
}

/// A sink that renders or ships log calls.
///
/// Only calls admitted by the logger's routing reach `log`; argument
/// resolution (including lazy producers) is the backend's job.
/// Implementations must not panic: logging is never allowed to take the
/// host application down.
pub trait Backend: Send + Sync {
    /// Stable identifier, used to find the backend in a logger's backend list.
    fn id(&self) -> &str;

    fn log(&self, level: Level, message: &str, args: &[MessageArg<'_>], context: &LoggerContext);
}
