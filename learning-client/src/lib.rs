//! Learning API client for the roadmap core.
//!
//! Fetches personalized learning paths, submits topic quizzes, and assembles
//! [`roadmap::Roadmap`] values from the responses.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────┐
//! │            RoadmapService              │
//! │  load_roadmap / submit_quiz / reset    │
//! └───────────────────┬────────────────────┘
//!                     │
//!            ┌────────▼────────┐
//!            │ LearningBackend │
//!            └────────┬────────┘
//!          ┌──────────┴──────────┐
//!   HttpLearningBackend   MockLearningBackend
//! ```
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use learning_client::{ClientConfig, HttpLearningBackend, RoadmapService};
//! use roadmap::{Language, Level, UnlockMode};
//!
//! # async fn run() -> Result<(), learning_client::LearningApiError> {
//! let backend = HttpLearningBackend::new(ClientConfig::from_env())?;
//! let service = RoadmapService::new(Arc::new(backend));
//! let roadmap = service
//!     .load_roadmap(Language::Python, Level::Beginner, UnlockMode::LevelActive)
//!     .await?;
//! println!("{:?}", roadmap.summary());
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod config;
pub mod error;
pub mod service;
pub mod types;

pub use backend::{HttpLearningBackend, LearningBackend, MockLearningBackend};
pub use config::ClientConfig;
pub use error::LearningApiError;
pub use service::RoadmapService;
pub use types::{
    GeneratePathRequest, LearningPath, PathTopic, SubmissionOutcome, TopicContent,
    TopicQuizSubmission,
};
