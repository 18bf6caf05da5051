//! Configuration for the roadmap core.

use serde::{Deserialize, Serialize};

use crate::quiz::MasteryThreshold;
use crate::unlock::UnlockMode;

/// Error types for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// YAML could not be parsed or written
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A value is out of range
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Roadmap core configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoadmapConfig {
    /// Quiz percentage at or above which a topic is mastered
    #[serde(default = "default_threshold")]
    pub mastery_threshold_percent: f64,
    /// Mode used when no level is selected
    #[serde(default = "default_mode")]
    pub default_mode: UnlockMode,
}

fn default_threshold() -> f64 {
    MasteryThreshold::DEFAULT_PERCENT
}

fn default_mode() -> UnlockMode {
    UnlockMode::Overview
}

impl Default for RoadmapConfig {
    fn default() -> Self {
        Self {
            mastery_threshold_percent: default_threshold(),
            default_mode: default_mode(),
        }
    }
}

impl RoadmapConfig {
    /// Load config from YAML and validate it.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = self.mastery_threshold_percent;
        if !(0.0..=100.0).contains(&t) {
            return Err(ConfigError::Invalid(format!(
                "mastery_threshold_percent must be within 0-100, got {}",
                t
            )));
        }
        Ok(())
    }

    pub fn mastery_threshold(&self) -> MasteryThreshold {
        MasteryThreshold::new(self.mastery_threshold_percent)
    }
}
