//! CLI configuration, read from `~/.ucte/config.toml` unless `--config`
//! names another file.
//!
//! ```toml
//! [logging]
//! level = "debug"
//!
//! [encode]
//! trim = true
//! schedules = false
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::Level;
use ucte_core::UcteError;
use ucte_io::EncodeOptions;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UcteConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Defaults for `ucte encode`; command-line flags take precedence
    #[serde(default)]
    pub encode: EncodeOptions,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl LoggingConfig {
    pub fn level(&self) -> Result<Level> {
        self.level
            .parse()
            .map_err(|_| anyhow!("invalid log level '{}' in configuration", self.level))
    }
}

/// The UCTE home directory (`~/.ucte`).
pub fn ucte_home() -> Result<PathBuf> {
    dirs::home_dir()
        .ok_or_else(|| anyhow!("Cannot determine home directory"))
        .map(|home| home.join(".ucte"))
}

pub fn default_config_path() -> Result<PathBuf> {
    Ok(ucte_home()?.join("config.toml"))
}

/// Load the configuration.
///
/// An explicit path must exist. Without one, a missing default file (or an
/// unknown home directory) yields the defaults.
pub fn load_config(path: Option<&Path>) -> Result<UcteConfig> {
    match path {
        Some(path) => read_config(path),
        None => match default_config_path() {
            Ok(path) if path.exists() => read_config(&path),
            _ => Ok(UcteConfig::default()),
        },
    }
}

fn read_config(path: &Path) -> Result<UcteConfig> {
    let contents = fs::read_to_string(path)
        .map_err(UcteError::Io)
        .with_context(|| format!("reading configuration '{}'", path.display()))?;
    let config: UcteConfig = toml::from_str(&contents)
        .map_err(|err| UcteError::Config(format!("{}: {}", path.display(), err)))?;
    config.logging.level()?;
    Ok(config)
}
