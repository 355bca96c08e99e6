//! Console configuration loader with multi-source merging

use super::console_config::ConsoleConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::Path;

/// Prefix of the environment variables overriding console options,
/// e.g. `CONTEXTLOG_CONSOLE_COLOR=false`.
pub const ENV_PREFIX: &str = "CONTEXTLOG_CONSOLE_";

/// Loads [`ConsoleConfig`] from defaults, an optional file and the environment.
pub struct ConsoleConfigLoader;

impl ConsoleConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `CONTEXTLOG_CONSOLE_*` environment variables
    /// 2. The TOML file at `config_path` (if provided and present)
    /// 3. Default values
    pub fn load(config_path: Option<&Path>) -> Result<ConsoleConfig, Box<figment::Error>> {
        Self::figment(config_path)
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()
            .map_err(Box::new)
    }

    /// Like [`load`](Self::load) without the environment layer.
    pub fn load_file(config_path: Option<&Path>) -> Result<ConsoleConfig, Box<figment::Error>> {
        Self::figment(config_path).extract().map_err(Box::new)
    }

    /// Load only default configuration
    pub fn load_defaults() -> ConsoleConfig {
        ConsoleConfig::default()
    }

    fn figment(config_path: Option<&Path>) -> Figment {
        let figment = Figment::new().merge(Serialized::defaults(ConsoleConfig::default()));
        match config_path {
            Some(path) if path.exists() => figment.merge(Toml::file(path)),
            _ => figment,
        }
    }
}
