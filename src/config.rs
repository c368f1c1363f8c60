//! Process configuration
//!
//! JSON file, every field optional. `HOST`, `PORT`, `USERSTORE_PATH` and
//! `USERSTORE_LOG_LEVEL` override the file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::http_server::HttpServerConfig;
use crate::observability::Severity;
use crate::store::{LocalBackend, UserStore};

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("Invalid config JSON: {0}")]
    Parse(String),

    #[error("Invalid config value: {0}")]
    Invalid(String),
}

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// JSON array file holding the records (default: "usuarios.json")
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,

    /// Replace the store file via temp file + rename (default: true)
    #[serde(default = "default_atomic_writes")]
    pub atomic_writes: bool,

    /// Minimum log severity (default: "info")
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub http: HttpServerConfig,
}

fn default_store_path() -> PathBuf {
    PathBuf::from("usuarios.json")
}

fn default_atomic_writes() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            atomic_writes: default_atomic_writes(),
            log_level: default_log_level(),
            http: HttpServerConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let config: Config =
            serde_json::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if it exists, defaults otherwise
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply environment overrides from the process environment
    pub fn apply_env(self) -> Result<Self, ConfigError> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup
    pub fn apply_env_from<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.http.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.http.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid(format!("PORT must be a port number, got '{}'", port)))?;
        }
        if let Some(path) = lookup("USERSTORE_PATH") {
            self.store_path = PathBuf::from(path);
        }
        if let Some(level) = lookup("USERSTORE_LOG_LEVEL") {
            self.log_level = level;
        }

        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.store_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("store_path must not be empty".into()));
        }
        if self.store_path.is_dir() {
            return Err(ConfigError::Invalid(format!(
                "store_path {} is a directory",
                self.store_path.display()
            )));
        }
        self.severity()?;
        Ok(())
    }

    pub fn severity(&self) -> Result<Severity, ConfigError> {
        Severity::parse(&self.log_level).ok_or_else(|| {
            ConfigError::Invalid(format!("unknown log_level '{}'", self.log_level))
        })
    }

    /// Build the store this configuration describes
    pub fn open_store(&self) -> UserStore {
        UserStore::with_backend(
            LocalBackend::with_atomic_writes(self.atomic_writes),
            self.store_path.clone(),
        )
    }
}
