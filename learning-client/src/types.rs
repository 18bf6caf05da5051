//! Wire types for the learning API.
//!
//! Field names follow the backend's camelCase JSON (`orderedTopics`,
//! `totalQuestions`). Status strings stay raw here and are validated when a
//! path is split into catalog and progress.

use roadmap::{
    CatalogKey, Language, Level, MasteryStatus, ProgressMap, Question, QuizSession,
    SubmissionItem, Topic, TopicCatalog, TopicId,
};
use serde::{Deserialize, Serialize};

#[cfg(feature = "typescript")]
use ts_rs::TS;

use crate::error::LearningApiError;

/// A topic inside a generated learning path, with its embedded status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct PathTopic {
    pub id: TopicId,
    pub title: String,
    /// Raw mastery status; absent means not attempted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl From<Topic> for PathTopic {
    fn from(topic: Topic) -> Self {
        Self {
            id: topic.id,
            title: topic.title,
            status: None,
        }
    }
}

/// A learner's personalized topic ordering for one level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct LearningPath {
    pub language: Language,
    pub level: Level,
    #[serde(default)]
    pub ordered_topics: Vec<PathTopic>,
}

impl LearningPath {
    pub fn key(&self) -> CatalogKey {
        CatalogKey::new(self.language, self.level)
    }

    /// Split into a validated catalog and a validated progress map.
    ///
    /// Fails on duplicate topic ids or any unknown status string.
    pub fn into_parts(self) -> Result<(TopicCatalog, ProgressMap), LearningApiError> {
        let key = self.key();
        let raw_progress: Vec<(TopicId, String)> = self
            .ordered_topics
            .iter()
            .filter_map(|t| t.status.clone().map(|s| (t.id.clone(), s)))
            .collect();
        let progress = ProgressMap::from_wire(raw_progress)?;

        let topics = self
            .ordered_topics
            .into_iter()
            .map(|t| Topic::new(t.id, t.title))
            .collect();
        let catalog = TopicCatalog::new(key, topics)?;
        Ok((catalog, progress))
    }
}

/// Body of `POST /learning/generate_path`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct GeneratePathRequest {
    pub language: Language,
    pub level: Level,
    pub quiz_results: Vec<SubmissionItem>,
    pub available_topics: Vec<Topic>,
}

/// Body of `POST /learning/topic/{language}/{topic_id}/submit`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct TopicQuizSubmission {
    pub submission: Vec<SubmissionItem>,
    pub total_questions: usize,
}

/// Backend verdict on a topic quiz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct SubmissionOutcome {
    pub status: MasteryStatus,
    /// Percentage, 0.0 - 100.0
    pub score: f64,
    #[serde(default)]
    pub message: Option<String>,
}

/// Lesson content and quiz for one topic, from
/// `GET /learning/topic/{language}/{topic_id}`.
///
/// This endpoint answers in snake_case, unlike the path endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct TopicContent {
    /// Display title; the backend sends it under `topic_id`
    #[serde(rename = "topic_id")]
    pub title: String,
    pub language: Language,
    pub status: MasteryStatus,
    /// Markdown lesson, AI-generated for weak topics
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub examples: Vec<String>,
    #[serde(default)]
    pub practice_problem: String,
    #[serde(default)]
    pub is_ai_generated: bool,
    #[serde(default)]
    pub quiz: Vec<Question>,
    #[serde(default)]
    pub mastered: bool,
}

impl TopicContent {
    /// Fresh quiz session over this topic's questions.
    pub fn quiz_session(&self) -> QuizSession {
        QuizSession::new(self.quiz.clone())
    }
}
