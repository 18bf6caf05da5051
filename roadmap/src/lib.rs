//! Roadmap core for the coding-education learning tracks.
//!
//! Derives, from an ordered topic catalog and a learner's mastery map, which
//! topics are open, and scores the quizzes that produce that mastery:
//!
//! - **Catalog**: fixed ordered topics per (language, level)
//! - **Progress**: mastery per topic, validated at ingestion
//! - **Unlock engine**: strict sequential frontier, one implementation
//! - **Quiz scoring**: order-independent score plus mastery classification
//! - **Learner state**: last level and placement results over a key-value store
//!
//! # Key Components
//!
//! - [`compute_unlock_state`]: the unlock rule
//! - [`Roadmap`]: catalog + progress + mode, recomputed on every read
//! - [`score_quiz`] and [`MasteryThreshold`]: quiz outcome to mastery status
//! - [`LearnerState`]: persisted learner preferences
//!
//! # Example
//!
//! ```
//! use roadmap::{compute_unlock_state, MasteryStatus, ProgressMap, Topic};
//!
//! let catalog = vec![Topic::new("a", "Variables"), Topic::new("b", "Loops")];
//! let progress = ProgressMap::from_wire([("a", "MASTERED")]).unwrap();
//!
//! let decisions = compute_unlock_state(&catalog, &progress, false);
//! assert!(decisions[1].interactive);
//! assert_eq!(decisions[1].status, MasteryStatus::NotAttempted);
//! ```

pub mod catalog;
pub mod config;
pub mod progress;
pub mod quiz;
pub mod store;
pub mod types;
pub mod unlock;

// Re-export main types
pub use catalog::{CatalogError, CatalogSet, TopicCatalog};
pub use config::{ConfigError, RoadmapConfig};
pub use progress::{ProgressError, ProgressMap};
pub use quiz::{build_submission, score_quiz, MasteryThreshold, QuizSession, SubmissionItem};
pub use store::{KeyValueStore, LearnerState, MemoryStore, PlacementResult, StoreError};
pub use types::*;
pub use unlock::{
    compute_unlock_state, frontier_index, is_certificate_eligible, Roadmap, RoadmapSummary,
    TopicPresentation, UnlockMode,
};
