//! Core trait for learning backends.
//!
//! This module defines the `LearningBackend` trait - the request/response
//! surface the roadmap needs from the learning service. Timeouts and retries
//! are the implementation's concern.

use async_trait::async_trait;
use roadmap::{Language, Level, SubmissionItem, Topic, TopicId};

use crate::error::LearningApiError;
use crate::types::{LearningPath, SubmissionOutcome, TopicContent};

#[async_trait]
pub trait LearningBackend: Send + Sync {
    /// Check if the backend is currently reachable.
    async fn is_available(&self) -> bool;

    /// Personalized path for a level, with embedded topic statuses.
    ///
    /// `None` when no path has been generated yet.
    async fn get_learning_path(
        &self,
        language: Language,
        level: Level,
    ) -> Result<Option<LearningPath>, LearningApiError>;

    /// Generate a personalized path from placement quiz results.
    async fn generate_learning_path(
        &self,
        language: Language,
        level: Level,
        quiz_results: Vec<SubmissionItem>,
        available_topics: Vec<Topic>,
    ) -> Result<LearningPath, LearningApiError>;

    /// Delete the personalized path for a level. Deleting a missing path is
    /// not an error.
    async fn reset_learning_path(
        &self,
        language: Language,
        level: Level,
    ) -> Result<(), LearningApiError>;

    /// Lesson content and quiz for a topic, with the learner's status.
    async fn get_topic_content(
        &self,
        language: Language,
        topic_id: &TopicId,
    ) -> Result<TopicContent, LearningApiError>;

    /// Submit a topic quiz; the backend records the resulting mastery.
    async fn submit_topic_quiz(
        &self,
        language: Language,
        topic_id: &TopicId,
        submission: Vec<SubmissionItem>,
        total_questions: usize,
    ) -> Result<SubmissionOutcome, LearningApiError>;
}
