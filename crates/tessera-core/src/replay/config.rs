use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_REPLAY_CONFIG_YAML: &str = include_str!("../../config/replay.default.yaml");

/// Sizing and seeding for a replay buffer and its sampling consumer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplayConfig {
    pub capacity: usize,
    pub batch_size: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        ReplayConfig {
            capacity: 10_000,
            batch_size: 32,
            seed: None,
        }
    }
}

impl ReplayConfig {
    /// Parse a replay config from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ReplayConfigError> {
        let config: ReplayConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a replay config from a YAML file path.
    pub fn from_yaml_path(path: impl AsRef<Path>) -> Result<Self, ReplayConfigError> {
        let yaml = fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    /// Return the default YAML config included with this crate.
    pub fn default_yaml() -> &'static str {
        DEFAULT_REPLAY_CONFIG_YAML
    }

    /// Parse the default YAML config included with this crate.
    pub fn from_default_yaml() -> Result<Self, ReplayConfigError> {
        Self::from_yaml_str(Self::default_yaml())
    }

    fn validate(&self) -> Result<(), ReplayConfigError> {
        if self.capacity == 0 {
            return Err(ReplayConfigError::Invalid(
                "capacity must be greater than 0".to_string(),
            ));
        }
        if self.batch_size == 0 {
            return Err(ReplayConfigError::Invalid(
                "batch_size must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Error type for loading and validating `ReplayConfig`.
#[derive(Debug, Error)]
pub enum ReplayConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid replay config: {0}")]
    Invalid(String),
}
