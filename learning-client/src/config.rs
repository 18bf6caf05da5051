//! Configuration for the learning API client.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::LearningApiError;

/// Environment variable holding the API base URL.
pub const ENV_API_URL: &str = "LEARNING_API_URL";
/// Environment variable holding the bearer token.
pub const ENV_API_TOKEN: &str = "LEARNING_API_TOKEN";

/// Client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the learning API
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Bearer token sent with every request
    #[serde(default)]
    pub api_token: Option<String>,
    /// Request timeout (ms)
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Retries after a transport error or 5xx response
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,
    /// Delay between retries (ms)
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout_ms() -> u64 {
    30_000
}

fn default_retry_count() -> u32 {
    2
}

fn default_retry_delay_ms() -> u64 {
    500
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_token: None,
            timeout_ms: default_timeout_ms(),
            retry_count: default_retry_count(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

impl ClientConfig {
    /// Create a config for a base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Defaults overridden by `LEARNING_API_URL` / `LEARNING_API_TOKEN`.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var(ENV_API_URL) {
            config.base_url = url;
        }
        config.api_token = std::env::var(ENV_API_TOKEN).ok().filter(|t| !t.is_empty());
        config
    }

    /// Load config from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, LearningApiError> {
        let config: Self =
            serde_yaml::from_str(yaml).map_err(|e| LearningApiError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    pub fn with_retries(mut self, retry_count: u32, retry_delay_ms: u64) -> Self {
        self.retry_count = retry_count;
        self.retry_delay_ms = retry_delay_ms;
        self
    }

    pub fn validate(&self) -> Result<(), LearningApiError> {
        if self.base_url.trim().is_empty() {
            return Err(LearningApiError::Config("base_url must not be empty".to_string()));
        }
        if self.timeout_ms == 0 {
            return Err(LearningApiError::Config("timeout_ms must be positive".to_string()));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}
