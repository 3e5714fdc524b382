//! TOML-based application configuration.
//!
//! Stores the remote event-service endpoint and credentials.
//! Configuration lives at `~/.config/fieldbook/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::error::ConfigError;

/// Remote event-service configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RemoteConfig {
    /// Base URL of the table-store REST endpoint.
    #[serde(default)]
    pub base_url: String,
    /// API key sent with every request.
    #[serde(default)]
    pub api_key: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/fieldbook/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub remote: RemoteConfig,
}

impl Config {
    fn config_path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("~/.config/fieldbook"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load the config file, falling back to defaults if it does not
    /// exist yet.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::LoadFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        toml::from_str(&contents).map_err(|e| ConfigError::LoadFailed {
            path,
            message: e.to_string(),
        })
    }

    /// Write the config file.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::config_path().map_err(|e| ConfigError::SaveFailed {
            path: PathBuf::from("~/.config/fieldbook"),
            message: e.to_string(),
        })?;
        let contents = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, contents).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
    }

    /// The configured remote endpoint, or an error naming the missing key.
    pub fn remote_endpoint(&self) -> Result<(&str, &str), ConfigError> {
        if self.remote.base_url.is_empty() {
            return Err(ConfigError::MissingKey("remote.base_url".to_string()));
        }
        Ok((&self.remote.base_url, &self.remote.api_key))
    }
}
