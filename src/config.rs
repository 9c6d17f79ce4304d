//! Configuration for Kalma
//!
//! Settings come from a TOML file (by default `<config dir>/kalma/config.toml`)
//! and can be overridden by environment variables:
//! - `KALMA_DB_PATH`: database file
//! - `KALMA_OWNER`: profile whose tasks are shown

use crate::error::{KalmaError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DB_PATH_ENV: &str = "KALMA_DB_PATH";
pub const OWNER_ENV: &str = "KALMA_OWNER";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Main configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KalmaConfig {
    /// Profile that owns created and listed tasks
    pub owner: String,

    /// Default log level when `--log-level` is not given
    pub log_level: String,

    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Database file; falls back to the platform data directory
    pub path: Option<PathBuf>,
}

impl Default for KalmaConfig {
    fn default() -> Self {
        Self {
            owner: "default".to_string(),
            log_level: "info".to_string(),
            database: DatabaseConfig::default(),
        }
    }
}

impl KalmaConfig {
    /// Default config file location
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("kalma")
            .join("config.toml")
    }

    /// Load configuration from TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: KalmaConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` (or the default location) and apply environment overrides
    ///
    /// A missing file at the default location yields the defaults; a missing
    /// file that was asked for explicitly is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Self::default_path();
                if default_path.exists() {
                    Self::from_file(&default_path)?
                } else {
                    debug!("No config file at {}, using defaults", default_path.display());
                    Self::default()
                }
            }
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Some(db_path) = non_empty_env(DB_PATH_ENV) {
            debug!("Using database path from {}", DB_PATH_ENV);
            self.database.path = Some(PathBuf::from(db_path));
        }
        if let Some(owner) = non_empty_env(OWNER_ENV) {
            debug!("Using owner from {}", OWNER_ENV);
            self.owner = owner;
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.owner.trim().is_empty() {
            return Err(KalmaError::Config("owner cannot be empty".to_string()));
        }

        if !LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(KalmaError::Config(format!(
                "log_level must be one of {}, got '{}'",
                LOG_LEVELS.join(", "),
                self.log_level
            )));
        }

        Ok(())
    }

    /// Resolve the database path: explicit argument, then config/env, then default
    pub fn db_path(&self, cli_path: Option<&str>) -> PathBuf {
        cli_path
            .map(PathBuf::from)
            .or_else(|| self.database.path.clone())
            .unwrap_or_else(default_db_path)
    }

    /// Save configuration to TOML file
    pub fn to_file(&self, path: &Path) -> Result<()> {
        let toml_str =
            toml::to_string_pretty(self).map_err(|e| KalmaError::Config(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml_str)?;
        Ok(())
    }
}

/// Default database location under the platform data directory
pub fn default_db_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("kalma")
        .join("kalma.db")
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
