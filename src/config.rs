use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::engine::scoring::Difficulty;
use crate::error::ConfigError;
use crate::session::mode::GameMode;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub mode: GameMode,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default)]
    pub passages_file: Option<String>,
    #[serde(default = "default_practice_tick_ms")]
    pub practice_tick_ms: u64,
    #[serde(default = "default_challenge_tick_ms")]
    pub challenge_tick_ms: u64,
}

fn default_theme() -> String {
    "midnight".to_string()
}
fn default_practice_tick_ms() -> u64 {
    100
}
fn default_challenge_tick_ms() -> u64 {
    1000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: GameMode::default(),
            difficulty: Difficulty::default(),
            theme: default_theme(),
            passages_file: None,
            practice_tick_ms: default_practice_tick_ms(),
            challenge_tick_ms: default_challenge_tick_ms(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Missing file means defaults; a present but broken file is an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: Config =
            toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))?;
        Ok(config)
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("typemaster")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.practice_tick_ms == 0 {
            return Err(ConfigError::ZeroTickRate {
                field: "practice_tick_ms",
            });
        }
        if self.challenge_tick_ms == 0 {
            return Err(ConfigError::ZeroTickRate {
                field: "challenge_tick_ms",
            });
        }
        Ok(())
    }

    /// Clock cadence for sessions of `mode`.
    pub fn tick_interval(&self, mode: GameMode) -> Duration {
        match mode {
            GameMode::Practice => Duration::from_millis(self.practice_tick_ms),
            GameMode::Challenge => Duration::from_millis(self.challenge_tick_ms),
        }
    }
}
