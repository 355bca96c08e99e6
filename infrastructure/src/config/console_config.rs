//! Console backend presentation options.

use serde::{Deserialize, Serialize};

/// How the console backend renders lines.
///
/// ```toml
/// timestamps = true
/// color = false
/// pretty_dump = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Prefix each line with an ISO-8601 UTC timestamp
    pub timestamps: bool,
    /// Color the level tag
    pub color: bool,
    /// Pretty-print dump values instead of compact JSON
    pub pretty_dump: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            timestamps: true,
            color: true,
            pretty_dump: false,
        }
    }
}

impl ConsoleConfig {
    pub fn with_timestamps(mut self, timestamps: bool) -> Self {
        self.timestamps = timestamps;
        self
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn with_pretty_dump(mut self, pretty_dump: bool) -> Self {
        self.pretty_dump = pretty_dump;
        self
    }

    /// Plain output for tests and non-terminal sinks.
    pub fn plain() -> Self {
        Self::default().with_color(false)
    }
}
