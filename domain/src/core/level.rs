//! Severity levels shared by loggers, routes and backends.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a log call, totally ordered from least to most severe.
///
/// A configured level *admits* an emitted level iff `configured <= emitted`.
/// [`Level::Muted`] is a configuration-only level: it sorts above every
/// emittable level so a route, path or backend set to it admits nothing.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    #[default]
    Debug,
    Info,
    Notice,
    Warning,
    Error,
    Fatal,
    Alert,
    Muted,
}

impl Level {
    /// Levels a logger can emit, in ascending order.
    pub const EMITTABLE: [Level; 7] = [
        Level::Debug,
        Level::Info,
        Level::Notice,
        Level::Warning,
        Level::Error,
        Level::Fatal,
        Level::Alert,
    ];

    /// Whether a sink configured at `self` receives a call emitted at `emitted`.
    pub fn admits(self, emitted: Level) -> bool {
        emitted != Level::Muted && self <= emitted
    }

    /// The stricter (closer to `alert`) of two levels.
    pub fn stricter(self, other: Level) -> Level {
        self.max(other)
    }

    /// Position in [`Level::EMITTABLE`], `None` for [`Level::Muted`].
    pub fn index(self) -> Option<usize> {
        match self {
            Level::Muted => None,
            level => Some(level as usize),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Notice => "NOTICE",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
            Level::Fatal => "FATAL",
            Level::Alert => "ALERT",
            Level::Muted => "MUTED",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "notice" => Ok(Level::Notice),
            "warning" | "warn" => Ok(Level::Warning),
            "error" => Ok(Level::Error),
            "fatal" => Ok(Level::Fatal),
            "alert" => Ok(Level::Alert),
            "muted" | "off" => Ok(Level::Muted),
            _ => Err(format!("Invalid Level: {}", s)),
        }
    }
}
