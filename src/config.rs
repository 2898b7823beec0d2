//! TOML configuration for the terminal host.
//!
//! Every field is optional:
//!
//! ```toml
//! frame_ms = 16
//! high_score_path = "/tmp/dodge.score"
//! log_file = "/tmp/dodge.log"
//!
//! [[stages]]
//! day = 1
//! name = "Warm-up"
//! bullet_speed = 2.5
//! bullet_frequency = 700
//! bullet_patterns = ["random", "wave"]
//! duration = 20000
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;
use crate::scores::FileHighScoreStore;
use crate::stages::{default_stages, validate_stages, StageConfig};

/// Environment variable naming the config file when no CLI argument is given.
pub const CONFIG_ENV: &str = "BULLET_DODGE_CONFIG";

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Host frame pacing in milliseconds (≈60 FPS by default).
    pub frame_ms: u64,
    pub high_score_path: Option<PathBuf>,
    /// Log destination. Without it logging stays off unless `RUST_LOG` is set.
    pub log_file: Option<PathBuf>,
    /// Replaces the built-in stage table when present.
    pub stages: Option<Vec<StageConfig>>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            frame_ms: 16,
            high_score_path: None,
            log_file: None,
            stages: None,
        }
    }
}

impl GameConfig {
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(contents)?;
        if let Some(stages) = &config.stages {
            validate_stages(stages)?;
        }
        Ok(config)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Config path from the first CLI argument, then `BULLET_DODGE_CONFIG`.
    /// Defaults when neither is set.
    pub fn load_from_env() -> Result<Self, ConfigError> {
        let path = std::env::args()
            .nth(1)
            .or_else(|| std::env::var(CONFIG_ENV).ok());
        match path {
            Some(path) => Self::load_from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn stage_table(&self) -> Vec<StageConfig> {
        self.stages.clone().unwrap_or_else(default_stages)
    }

    pub fn high_score_path(&self) -> PathBuf {
        self.high_score_path
            .clone()
            .unwrap_or_else(FileHighScoreStore::default_path)
    }
}
