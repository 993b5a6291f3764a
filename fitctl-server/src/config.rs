//! Server configuration loaded from ~/.fitctl/config.toml
//!
//! Every key is optional in the file. Precedence, lowest first: built-in
//! defaults, config file, environment (`DATABASE_URL`, `FITCTL_BIND`), then
//! whatever the CLI sets on top.

use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::db::pool::DEFAULT_MAX_CONNECTIONS;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://fitness_center.db";

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid value for {var}: '{value}'")]
    InvalidEnv { var: &'static str, value: String },
}

/// fitctl configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitctlConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub max_connections: u32,
    pub cors_permissive: bool,
    /// Report "member not found" separately from "workouts not found" in
    /// the name lookup. Off keeps both as "workouts not found".
    pub distinct_lookup_errors: bool,
}

impl Default for FitctlConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            cors_permissive: false,
            distinct_lookup_errors: false,
        }
    }
}

impl FitctlConfig {
    /// Get config file path: ~/.fitctl/config.toml
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".fitctl/config.toml")
    }

    /// Load the default config file if it exists, defaults otherwise, then
    /// apply environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();
        let mut config = if path.exists() {
            Self::from_file(&path)?
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Self::default()
        };
        config.apply_env()?;
        Ok(config)
    }

    /// Parse a specific config file (no environment overrides).
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })
    }

    /// Apply `DATABASE_URL` and `FITCTL_BIND` when set.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Ok(url) = env::var("DATABASE_URL") {
            self.database_url = url;
        }

        if let Ok(bind) = env::var("FITCTL_BIND") {
            self.bind_addr = bind.parse().map_err(|_| ConfigError::InvalidEnv {
                var: "FITCTL_BIND",
                value: bind.clone(),
            })?;
        }

        Ok(())
    }
}
