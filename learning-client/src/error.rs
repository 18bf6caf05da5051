//! Error types for learning-client

use roadmap::{CatalogError, ProgressError, TopicId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LearningApiError {
    #[error("Learning API unavailable: {0}")]
    Unavailable(String),

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid progress data: {0}")]
    InvalidProgress(#[from] ProgressError),

    #[error("Invalid learning path: {0}")]
    InvalidCatalog(#[from] CatalogError),

    #[error("Configuration error: {0}")]
    Config(String),

    /// Topic is not open in the current roadmap
    #[error("Topic {0} is locked")]
    TopicLocked(TopicId),
}

impl LearningApiError {
    /// Transport failures and server errors are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) | Self::Unavailable(_) => true,
            Self::Http { status, .. } => *status >= 500,
            _ => false,
        }
    }
}
