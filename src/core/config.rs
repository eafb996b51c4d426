//! Configuration file management.
//!
//! Reads the Vault connection settings from the fixed well-known path
//! `/etc/vault/config.yaml`. The file carries the AppRole credential pair
//! used when no session token is supplied via the environment.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::core::constants;
use crate::error::{ConfigError, Result};

/// Vault connection settings from `/etc/vault/config.yaml`.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Vault endpoint URL, e.g. `https://vault.example.com:8200`.
    pub url: String,
    /// AppRole role_id used for login.
    pub role_id: String,
    /// AppRole secret_id used for login.
    pub secret_id: String,
}

impl Config {
    /// Path to the configuration file.
    pub fn config_path() -> PathBuf {
        PathBuf::from(constants::CONFIG_FILE)
    }

    /// Load configuration from the fixed path.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if the file doesn't exist,
    /// `ConfigError::Read` on I/O failure, or `ConfigError::Parse` if the
    /// YAML is malformed or missing a field.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading config");

        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()).into());
        }
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Read)?;
        let config: Self = serde_yaml::from_str(&contents).map_err(ConfigError::Parse)?;

        debug!(url = %config.url, "config loaded");

        Ok(config)
    }
}
