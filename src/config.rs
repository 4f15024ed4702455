//! Configuration and data directory handling
//!
//! Arise keeps its state under `~/.arise/`: the progression database and an
//! optional `config.toml` overriding defaults.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Override for the progression database location
    pub db_path: Option<PathBuf>,
    /// Weekly workout goal applied to new profiles
    pub default_weekly_goal: u32,
    /// Preferred workout duration in minutes for new profiles
    pub default_workout_duration: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: None,
            default_weekly_goal: 3,
            default_workout_duration: 30,
        }
    }
}

impl Config {
    /// Get the global data directory path (~/.arise/)
    pub fn global_config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".arise")
    }

    /// Get the global config file path (~/.arise/config.toml)
    pub fn global_config_path() -> PathBuf {
        Self::global_config_dir().join("config.toml")
    }

    /// Default database location (~/.arise/arise.db)
    pub fn default_db_path() -> PathBuf {
        Self::global_config_dir().join("arise.db")
    }

    /// Load the global config, falling back to defaults when no file exists
    pub fn load() -> Result<Self> {
        let path = Self::global_config_path();
        if path.exists() {
            Self::from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config dir: {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Resolved database path: explicit override or the default location
    pub fn db_path(&self) -> PathBuf {
        self.db_path.clone().unwrap_or_else(Self::default_db_path)
    }
}
