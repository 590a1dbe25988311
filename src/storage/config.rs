//! Configuration handling for the `ini` tool
//!
//! Configuration is stored in `~/.config/ini-store/config.toml` (or the
//! platform equivalent). `INI_STORE_CONFIG` points at a different file.
//!
//! ```toml
//! default_mode = "update_on_dispose"
//! default_format = "json"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::UpdateMode;

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "INI_STORE_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Output format for commands
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Update mode used when `--mode` is not given
    pub default_mode: UpdateMode,

    /// Output format used when `--format` is not given
    pub default_format: OutputFormat,
}

impl Config {
    /// Loads configuration from `INI_STORE_CONFIG` or the default location
    ///
    /// A missing file yields the defaults.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Loads configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Returns the config file path, preferring `INI_STORE_CONFIG`
    pub fn config_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }

        Self::global_config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Returns the platform config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "ini-store", "ini-store")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }
}
