//! Configuration loading and management

mod io;
mod settings;

pub use settings::{ApiSettings, NotificationSettings};

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Main configuration structure (`~/.learnit/config.toml`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// LearnIT API connection
    #[serde(default)]
    pub api: ApiSettings,

    /// Transient notification timing
    #[serde(default)]
    pub notifications: NotificationSettings,
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load configuration from a file, falling back to defaults if it does not exist
    pub fn from_file_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::from_file(path)
    }

    /// Apply command-line overrides
    pub fn with_overrides(mut self, api_url: Option<String>, token: Option<String>) -> Self {
        if let Some(url) = api_url {
            self.api.base_url = url;
        }
        if let Some(token) = token {
            self.api.token = token;
        }
        self
    }
}
