//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::storage::StorageConfig;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Report file names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_levels_file")]
    pub levels_file: String,

    #[serde(default = "default_statistics_file")]
    pub statistics_file: String,
}

fn default_levels_file() -> String {
    "player_levels.txt".to_string()
}

fn default_statistics_file() -> String {
    "tournament_statistics.txt".to_string()
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            levels_file: default_levels_file(),
            statistics_file: default_statistics_file(),
        }
    }
}

/// Script replay behaviour.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReplayConfig {
    /// Abort on the first rejected command
    #[serde(default)]
    pub strict: bool,
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    #[serde(default)]
    pub export: ExportConfig,

    #[serde(default)]
    pub replay: ReplayConfig,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./reports")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            output_dir: default_output_dir(),
            export: ExportConfig::default(),
            replay: ReplayConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file is absent.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        Self::from_file(path)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "Unknown log level: {}",
                self.log_level
            )));
        }

        if self.export.levels_file.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "Levels file name must not be empty".to_string(),
            ));
        }

        if self.export.statistics_file.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "Statistics file name must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Report locations derived from this configuration.
    pub fn storage(&self) -> StorageConfig {
        StorageConfig {
            output_dir: self.output_dir.clone(),
            levels_file: self.export.levels_file.clone(),
            statistics_file: self.export.statistics_file.clone(),
        }
    }
}
