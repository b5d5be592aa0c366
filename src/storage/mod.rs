//! Filesystem operations.
//!
//! Handles everything that touches files:
//! - JSONL command scripts and machine-readable reports
//! - Text exports of player levels and tournament statistics

pub mod export;
pub mod jsonl;

pub use export::*;
pub use jsonl::*;

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error on line {line}: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),
}

/// Where reports are written.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub output_dir: PathBuf,
    pub levels_file: String,
    pub statistics_file: String,
}

impl StorageConfig {
    pub fn new(output_dir: PathBuf) -> Self {
        Self {
            output_dir,
            levels_file: "player_levels.txt".to_string(),
            statistics_file: "tournament_statistics.txt".to_string(),
        }
    }

    pub fn levels_path(&self) -> PathBuf {
        self.output_dir.join(&self.levels_file)
    }

    pub fn statistics_path(&self) -> PathBuf {
        self.output_dir.join(&self.statistics_file)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("./reports"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_config_paths() {
        let config = StorageConfig::new(PathBuf::from("/out"));

        assert_eq!(config.levels_path(), PathBuf::from("/out/player_levels.txt"));
        assert_eq!(
            config.statistics_path(),
            PathBuf::from("/out/tournament_statistics.txt")
        );
    }

    #[test]
    fn test_storage_config_default() {
        let config = StorageConfig::default();
        assert_eq!(config.output_dir, PathBuf::from("./reports"));
    }
}
