//! Point-in-time log entries of the context tree.

use super::node::{Context, ContextNode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Weak;
use std::time::Duration;

/// Kind tag of a [`Log`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogKind {
    #[serde(rename = "InfoLog")]
    Info,
    #[serde(rename = "WarningLog")]
    Warning,
    #[serde(rename = "ErrorLog")]
    Error,
}

impl LogKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogKind::Info => "InfoLog",
            LogKind::Warning => "WarningLog",
            LogKind::Error => "ErrorLog",
        }
    }
}

impl fmt::Display for LogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of the error an error log was created from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    /// `Display` output of the error.
    pub message: String,
    /// `Debug` output of the error.
    pub details: String,
}

impl ErrorRecord {
    pub fn capture<E: fmt::Display + fmt::Debug + ?Sized>(error: &E) -> Self {
        Self {
            message: error.to_string(),
            details: format!("{:?}", error),
        }
    }
}

/// An info, warning or error entry. Immutable once appended.
#[derive(Debug)]
pub struct Log {
    id: String,
    timestamp: Duration,
    kind: LogKind,
    text: String,
    data: Option<Value>,
    error: Option<ErrorRecord>,
    context: Weak<ContextNode>,
}

impl Log {
    pub(crate) fn new(
        context: Weak<ContextNode>,
        timestamp: Duration,
        kind: LogKind,
        text: String,
        data: Option<Value>,
        error: Option<ErrorRecord>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp,
            kind,
            text,
            data,
            error,
            context,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn timestamp(&self) -> Duration {
        self.timestamp
    }

    pub fn kind(&self) -> LogKind {
        self.kind
    }

    /// Description; the error message for error logs.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    pub fn error(&self) -> Option<&ErrorRecord> {
        self.error.as_ref()
    }

    pub fn is_error(&self) -> bool {
        self.kind == LogKind::Error
    }

    /// The context this entry was logged in, while that context is alive.
    pub fn context(&self) -> Option<Context> {
        self.context.upgrade().map(Context::from_node)
    }

    /// Time between `from` and this entry.
    pub fn elapsed_from(&self, from: Duration) -> Duration {
        self.timestamp.saturating_sub(from)
    }
}
