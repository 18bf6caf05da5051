//! Mock learning backend for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use tokio::sync::RwLock;

use roadmap::{
    CatalogKey, Language, Level, MasteryStatus, MasteryThreshold, QuizScore, SubmissionItem,
    Topic, TopicId,
};

use super::traits::LearningBackend;
use crate::error::LearningApiError;
use crate::types::{LearningPath, PathTopic, SubmissionOutcome, TopicContent};

/// In-memory backend.
///
/// Keeps generated paths per (language, level) and grades topic quizzes from
/// the submitted `is_correct` flags, writing the verdict back into the path.
pub struct MockLearningBackend {
    paths: RwLock<HashMap<CatalogKey, LearningPath>>,
    contents: HashMap<(Language, TopicId), TopicContent>,
    threshold: MasteryThreshold,
    available: AtomicBool,
    call_count: AtomicU32,
}

impl MockLearningBackend {
    pub fn new() -> Self {
        Self {
            paths: RwLock::new(HashMap::new()),
            contents: HashMap::new(),
            threshold: MasteryThreshold::default(),
            available: AtomicBool::new(true),
            call_count: AtomicU32::new(0),
        }
    }

    /// Seed a stored path.
    pub fn with_path(mut self, path: LearningPath) -> Self {
        self.paths.get_mut().insert(path.key(), path);
        self
    }

    /// Seed lesson content for a topic. Status fields are derived from the
    /// stored paths when served.
    pub fn with_topic_content(
        mut self,
        topic_id: impl Into<TopicId>,
        content: TopicContent,
    ) -> Self {
        self.contents.insert((content.language, topic_id.into()), content);
        self
    }

    /// Set availability.
    pub fn with_available(self, available: bool) -> Self {
        self.available.store(available, Ordering::SeqCst);
        self
    }

    pub fn with_threshold(mut self, threshold: MasteryThreshold) -> Self {
        self.threshold = threshold;
        self
    }

    /// Get the number of API calls made.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Reset the call count.
    pub fn reset_call_count(&self) {
        self.call_count.store(0, Ordering::SeqCst);
    }

    /// Snapshot of a stored path.
    pub async fn stored_path(&self, language: Language, level: Level) -> Option<LearningPath> {
        self.paths
            .read()
            .await
            .get(&CatalogKey::new(language, level))
            .cloned()
    }

    /// Recorded status for a topic across the language's stored paths.
    async fn topic_status(&self, language: Language, topic_id: &TopicId) -> MasteryStatus {
        let paths = self.paths.read().await;
        paths
            .values()
            .filter(|p| p.language == language)
            .flat_map(|p| p.ordered_topics.iter())
            .find(|t| &t.id == topic_id)
            .and_then(|t| t.status.as_deref())
            .and_then(|s| s.parse::<MasteryStatus>().ok())
            .unwrap_or_default()
    }

    fn begin_call(&self) -> Result<(), LearningApiError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        if !self.available.load(Ordering::SeqCst) {
            return Err(LearningApiError::Unavailable(
                "Mock backend disabled".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for MockLearningBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LearningBackend for MockLearningBackend {
    async fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    async fn get_learning_path(
        &self,
        language: Language,
        level: Level,
    ) -> Result<Option<LearningPath>, LearningApiError> {
        self.begin_call()?;
        Ok(self.stored_path(language, level).await)
    }

    async fn generate_learning_path(
        &self,
        language: Language,
        level: Level,
        _quiz_results: Vec<SubmissionItem>,
        available_topics: Vec<Topic>,
    ) -> Result<LearningPath, LearningApiError> {
        self.begin_call()?;
        let path = LearningPath {
            language,
            level,
            ordered_topics: available_topics.into_iter().map(PathTopic::from).collect(),
        };
        self.paths.write().await.insert(path.key(), path.clone());
        Ok(path)
    }

    async fn reset_learning_path(
        &self,
        language: Language,
        level: Level,
    ) -> Result<(), LearningApiError> {
        self.begin_call()?;
        self.paths
            .write()
            .await
            .remove(&CatalogKey::new(language, level));
        Ok(())
    }

    async fn get_topic_content(
        &self,
        language: Language,
        topic_id: &TopicId,
    ) -> Result<TopicContent, LearningApiError> {
        self.begin_call()?;
        let status = self.topic_status(language, topic_id).await;
        let mut content = self
            .contents
            .get(&(language, topic_id.clone()))
            .cloned()
            .unwrap_or_else(|| TopicContent {
                title: topic_id.to_string(),
                language,
                status,
                content: format!("Content for {} coming soon.", topic_id),
                examples: Vec::new(),
                practice_problem: String::new(),
                is_ai_generated: false,
                quiz: Vec::new(),
                mastered: false,
            });
        content.status = status;
        content.is_ai_generated = status == MasteryStatus::Weak;
        content.mastered = status.is_mastered();
        Ok(content)
    }

    async fn submit_topic_quiz(
        &self,
        language: Language,
        topic_id: &TopicId,
        submission: Vec<SubmissionItem>,
        total_questions: usize,
    ) -> Result<SubmissionOutcome, LearningApiError> {
        self.begin_call()?;

        let correct_count = submission.iter().filter(|item| item.is_correct).count();
        let percentage = if total_questions == 0 {
            0.0
        } else {
            correct_count as f64 / total_questions as f64 * 100.0
        };
        let score = QuizScore {
            correct_count,
            total: total_questions,
            percentage,
        };
        let status = self.threshold.classify(&score);

        let mut paths = self.paths.write().await;
        for path in paths.values_mut().filter(|p| p.language == language) {
            for topic in path.ordered_topics.iter_mut().filter(|t| &t.id == topic_id) {
                topic.status = Some(status.as_str().to_string());
            }
        }

        Ok(SubmissionOutcome {
            status,
            score: percentage,
            message: Some(format!("Scored {:.0}%", percentage)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roadmap::{Question, QuestionId};

    fn item(id: u32, is_correct: bool) -> SubmissionItem {
        SubmissionItem {
            question_id: QuestionId::from(id),
            question: format!("Question {id}"),
            selected_option: "a".to_string(),
            correct_option: if is_correct { "a" } else { "b" }.to_string(),
            is_correct,
        }
    }

    #[tokio::test]
    async fn test_generate_then_get() {
        let backend = MockLearningBackend::new();
        assert!(backend
            .get_learning_path(Language::Python, Level::Beginner)
            .await
            .unwrap()
            .is_none());

        let topics = vec![Topic::new("2", "Operators"), Topic::new("1", "Variables")];
        backend
            .generate_learning_path(Language::Python, Level::Beginner, Vec::new(), topics)
            .await
            .unwrap();

        let path = backend
            .get_learning_path(Language::Python, Level::Beginner)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(path.ordered_topics[0].id, TopicId::from("2"));
        assert_eq!(backend.call_count(), 3);
    }

    #[tokio::test]
    async fn test_submit_updates_embedded_status() {
        let backend = MockLearningBackend::new();
        backend
            .generate_learning_path(
                Language::Java,
                Level::Beginner,
                Vec::new(),
                vec![Topic::new("1", "Java Basics")],
            )
            .await
            .unwrap();

        let submission = vec![item(1, true), item(2, true), item(3, true), item(4, false)];
        let outcome = backend
            .submit_topic_quiz(Language::Java, &TopicId::from("1"), submission, 4)
            .await
            .unwrap();
        assert_eq!(outcome.status, MasteryStatus::Mastered);
        assert_eq!(outcome.score, 75.0);

        let path = backend
            .stored_path(Language::Java, Level::Beginner)
            .await
            .unwrap();
        assert_eq!(path.ordered_topics[0].status.as_deref(), Some("MASTERED"));
    }

    #[tokio::test]
    async fn test_topic_content_tracks_submitted_status() {
        let content = TopicContent {
            title: "Variables & Data Types".to_string(),
            language: Language::Python,
            status: MasteryStatus::NotAttempted,
            content: "# Variables".to_string(),
            examples: Vec::new(),
            practice_problem: String::new(),
            is_ai_generated: false,
            quiz: vec![Question::new(101u32, "Tuple")],
            mastered: false,
        };
        let backend = MockLearningBackend::new().with_topic_content("1", content);
        backend
            .generate_learning_path(
                Language::Python,
                Level::Beginner,
                Vec::new(),
                vec![Topic::new("1", "Variables & Data Types")],
            )
            .await
            .unwrap();

        let before = backend
            .get_topic_content(Language::Python, &TopicId::from("1"))
            .await
            .unwrap();
        assert_eq!(before.status, MasteryStatus::NotAttempted);
        assert_eq!(before.quiz.len(), 1);

        backend
            .submit_topic_quiz(Language::Python, &TopicId::from("1"), vec![item(101, false)], 1)
            .await
            .unwrap();
        let after = backend
            .get_topic_content(Language::Python, &TopicId::from("1"))
            .await
            .unwrap();
        assert_eq!(after.status, MasteryStatus::Weak);
        assert!(after.is_ai_generated);
        assert!(!after.mastered);
    }

    #[tokio::test]
    async fn test_unseeded_topic_has_placeholder_content() {
        let backend = MockLearningBackend::new();
        let content = backend
            .get_topic_content(Language::Java, &TopicId::from("7"))
            .await
            .unwrap();
        assert!(content.quiz.is_empty());
        assert_eq!(content.status, MasteryStatus::NotAttempted);
    }

    #[tokio::test]
    async fn test_below_threshold_is_weak() {
        let backend = MockLearningBackend::new();
        let outcome = backend
            .submit_topic_quiz(
                Language::Python,
                &TopicId::from("1"),
                vec![item(1, true), item(2, false)],
                2,
            )
            .await
            .unwrap();
        assert_eq!(outcome.status, MasteryStatus::Weak);
    }

    #[tokio::test]
    async fn test_mock_unavailable() {
        let backend = MockLearningBackend::new().with_available(false);
        assert!(!backend.is_available().await);

        let result = backend
            .get_learning_path(Language::Python, Level::Beginner)
            .await;
        assert!(matches!(result, Err(LearningApiError::Unavailable(_))));
        assert_eq!(backend.call_count(), 1);
    }
}
