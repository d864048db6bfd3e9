//! Application configuration

use anyhow::{Context, Result};
use inkboard_types::{DisplayConfig, NotificationConfig, ScheduleConfig, SourceConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application-wide configuration
///
/// Every section falls back to its defaults when absent from the file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    /// Panel geometry, fonts and colour scheme
    #[serde(default)]
    pub display: DisplayConfig,
    /// Flip and refresh timing
    #[serde(default)]
    pub schedule: ScheduleConfig,
    /// Quote cache and endpoint
    #[serde(default)]
    pub source: SourceConfig,
    /// Countdown targets
    #[serde(default)]
    pub notifications: NotificationConfig,
}

impl AppConfig {
    /// Load configuration from the user config directory
    ///
    /// A missing file yields the defaults.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            log::debug!(
                "No config at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }

        Self::load_from_path(&config_path)
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("com", "inkboard", "inkboard")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("config.json"))
    }

    /// Load configuration from a specific file path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Pretty-printed JSON of the effective configuration
    pub fn to_pretty_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
