//! Backend forwarding admitted calls to `tracing` events.

use contextlog_domain::{Backend, Level, LoggerContext, MessageArg, prepare_message};
use serde_json::Value;

/// Id of the tracing backend.
pub const TRACING_BACKEND_ID: &str = "TRACING";

/// Emits each call as a `tracing` event with `logger` and `level` fields.
///
/// The host installs the subscriber. Dump values travel as a JSON `dump` field.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingBackend;

impl TracingBackend {
    pub fn new() -> Self {
        Self
    }
}

/// `tracing` severity used for `level`.
pub fn tracing_level(level: Level) -> tracing::Level {
    match level {
        Level::Debug => tracing::Level::DEBUG,
        Level::Info | Level::Notice => tracing::Level::INFO,
        Level::Warning => tracing::Level::WARN,
        Level::Error | Level::Fatal | Level::Alert | Level::Muted => tracing::Level::ERROR,
    }
}

impl Backend for TracingBackend {
    fn id(&self) -> &str {
        TRACING_BACKEND_ID
    }

    fn log(&self, level: Level, message: &str, args: &[MessageArg<'_>], context: &LoggerContext) {
        let prepared = prepare_message(message, args);
        let dump = (!prepared.dump_values.is_empty())
            .then(|| Value::Array(prepared.dump_values).to_string());
        let logger = context.path.as_str();
        let name = level.as_str();
        let text = prepared.message;

        match tracing_level(level) {
            tracing::Level::DEBUG => {
                tracing::debug!(logger, level = name, dump = dump.as_deref(), "{}", text)
            }
            tracing::Level::INFO => {
                tracing::info!(logger, level = name, dump = dump.as_deref(), "{}", text)
            }
            tracing::Level::WARN => {
                tracing::warn!(logger, level = name, dump = dump.as_deref(), "{}", text)
            }
            _ => tracing::error!(logger, level = name, dump = dump.as_deref(), "{}", text),
        }
    }
}
