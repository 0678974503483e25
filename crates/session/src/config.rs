//! Configuration loading.
//!
//! Every field has a default, so an absent or partial TOML file is fine:
//!
//! ```toml
//! [session]
//! max_upload_bytes = 10485760
//! max_time = 60
//! difficulty_max = 3
//!
//! [client]
//! recognize_url = "http://localhost:8000/backend/recognize"
//! recommend_url = "http://localhost:8000/backend/recommend"
//! timeout_secs = 30
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use domain::DEFAULT_MAX_UPLOAD_BYTES;
use service_client::{ClientConfig, DEFAULT_DIFFICULTY_MAX, DEFAULT_MAX_TIME, RecommendFilters};

/// Errors that can occur while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Limits and filters applied by the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub max_upload_bytes: u64,
    pub max_time: u32,
    pub difficulty_max: u8,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            max_time: DEFAULT_MAX_TIME,
            difficulty_max: DEFAULT_DIFFICULTY_MAX,
        }
    }
}

impl SessionConfig {
    /// Filters sent with every recommendation request
    pub fn filters(&self) -> RecommendFilters {
        RecommendFilters {
            max_time: self.max_time,
            difficulty_max: self.difficulty_max,
        }
    }
}

/// Whole-application configuration as stored on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub session: SessionConfig,
    pub client: ClientConfig,
}

impl AppConfig {
    /// Load from a TOML file, or return defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => {
                let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })?;
                let config = Self::from_toml_str(&text)?;
                info!("Loaded configuration from {}", path.display());
                Ok(config)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
