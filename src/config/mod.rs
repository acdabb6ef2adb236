//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::schedule::{GenerationBounds, GenerationParams, ScoringWeights};

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

/// Generation defaults and the accepted ranges for rounds and courts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    #[serde(default = "default_rounds")]
    pub default_rounds: u32,

    #[serde(default = "default_courts")]
    pub default_courts: u32,

    #[serde(default = "default_min")]
    pub min_rounds: u32,

    #[serde(default = "default_max_rounds")]
    pub max_rounds: u32,

    #[serde(default = "default_min")]
    pub min_courts: u32,

    #[serde(default = "default_max_courts")]
    pub max_courts: u32,
}

fn default_rounds() -> u32 {
    8
}

fn default_courts() -> u32 {
    2
}

fn default_min() -> u32 {
    1
}

fn default_max_rounds() -> u32 {
    12
}

fn default_max_courts() -> u32 {
    8
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            default_rounds: default_rounds(),
            default_courts: default_courts(),
            min_rounds: default_min(),
            max_rounds: default_max_rounds(),
            min_courts: default_min(),
            max_courts: default_max_courts(),
        }
    }
}

impl GenerationConfig {
    pub fn bounds(&self) -> GenerationBounds {
        GenerationBounds {
            min_rounds: self.min_rounds,
            max_rounds: self.max_rounds,
            min_courts: self.min_courts,
            max_courts: self.max_courts,
        }
    }

    /// Resolve optional overrides against the configured defaults.
    pub fn params(&self, rounds: Option<u32>, courts: Option<u32>) -> GenerationParams {
        GenerationParams {
            rounds: rounds.unwrap_or(self.default_rounds),
            courts: courts.unwrap_or(self.default_courts),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub generation: GenerationConfig,

    #[serde(default)]
    pub scoring: ScoringWeights,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            generation: GenerationConfig::default(),
            scoring: ScoringWeights::default(),
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

    /// Load from `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let g = &self.generation;

        if g.min_rounds == 0 || g.min_courts == 0 {
            return Err(ConfigError::ValidationError(
                "Minimum rounds and courts must be greater than 0".to_string(),
            ));
        }

        if g.min_rounds > g.max_rounds || g.min_courts > g.max_courts {
            return Err(ConfigError::ValidationError(
                "Minimum bounds must not exceed maximum bounds".to_string(),
            ));
        }

        let defaults = g.params(None, None);
        if let Err(e) = g.bounds().check(defaults) {
            return Err(ConfigError::ValidationError(format!(
                "Default generation parameters out of bounds: {}",
                e
            )));
        }

        if let Some(name) = self.scoring.first_negative() {
            return Err(ConfigError::ValidationError(format!(
                "Scoring weight {} must not be negative",
                name
            )));
        }

        Ok(())
    }
}
