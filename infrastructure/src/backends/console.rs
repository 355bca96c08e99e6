//! Terminal backend printing one line per admitted call.

use crate::config::ConsoleConfig;
use chrono::{DateTime, SecondsFormat, Utc};
use colored::{ColoredString, Colorize};
use contextlog_domain::{Backend, Level, LoggerContext, MessageArg, prepare_message};
use serde_json::Value;
use std::io::Write;

/// Id of the console backend.
pub const CONSOLE_BACKEND_ID: &str = "CONSOLE";

/// Output stream of a rendered line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleStream {
    Stdout,
    Stderr,
}

impl ConsoleStream {
    /// debug/info/notice go to stdout; warning and stricter to stderr.
    pub fn for_level(level: Level) -> Self {
        if level >= Level::Warning {
            ConsoleStream::Stderr
        } else {
            ConsoleStream::Stdout
        }
    }
}

/// A line ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedLine {
    pub stream: ConsoleStream,
    pub text: String,
}

/// Writes `[timestamp][LEVEL][path] : message`, followed by dump values.
#[derive(Debug, Clone, Default)]
pub struct ConsoleBackend {
    config: ConsoleConfig,
}

impl ConsoleBackend {
    pub fn new(config: ConsoleConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    /// Render a call without writing it.
    pub fn render(
        &self,
        level: Level,
        message: &str,
        args: &[MessageArg<'_>],
        context: &LoggerContext,
        now: DateTime<Utc>,
    ) -> RenderedLine {
        let prepared = prepare_message(message, args);

        let mut text = String::new();
        if self.config.timestamps {
            text.push('[');
            text.push_str(&now.to_rfc3339_opts(SecondsFormat::Millis, true));
            text.push(']');
        }
        text.push('[');
        text.push_str(&self.level_tag(level).to_string());
        text.push_str("][");
        text.push_str(&context.path);
        text.push_str("] : ");
        text.push_str(&prepared.message);

        for value in &prepared.dump_values {
            text.push(' ');
            text.push_str(&self.render_dump(value));
        }

        RenderedLine {
            stream: ConsoleStream::for_level(level),
            text,
        }
    }

    fn level_tag(&self, level: Level) -> ColoredString {
        let tag = level.as_str();
        if !self.config.color {
            return tag.normal();
        }
        match level {
            Level::Debug => tag.dimmed(),
            Level::Info => tag.cyan(),
            Level::Notice => tag.green(),
            Level::Warning => tag.yellow(),
            Level::Error => tag.red(),
            Level::Fatal | Level::Alert | Level::Muted => tag.red().bold(),
        }
    }

    fn render_dump(&self, value: &Value) -> String {
        let rendered = if self.config.pretty_dump {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        rendered.unwrap_or_else(|_| value.to_string())
    }
}

impl Backend for ConsoleBackend {
    fn id(&self) -> &str {
        CONSOLE_BACKEND_ID
    }

    fn log(&self, level: Level, message: &str, args: &[MessageArg<'_>], context: &LoggerContext) {
        let line = self.render(level, message, args, context, Utc::now());
        // Closed pipes are ignored.
        let _ = match line.stream {
            ConsoleStream::Stdout => writeln!(std::io::stdout().lock(), "{}", line.text),
            ConsoleStream::Stderr => writeln!(std::io::stderr().lock(), "{}", line.text),
        };
    }
}
