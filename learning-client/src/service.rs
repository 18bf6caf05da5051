//! RoadmapService - assembles roadmaps from the learning backend.
//!
//! The backend owns persisted paths and mastery; this service turns its
//! responses into a validated [`Roadmap`] and drives quiz submission.

use std::sync::Arc;
use tracing::{debug, info, warn};

use roadmap::{
    CatalogKey, CatalogSet, Language, Level, MasteryStatus, ProgressMap, QuizSession, Roadmap,
    RoadmapConfig, SubmissionItem, TopicCatalog, TopicId, UnlockMode,
};

use crate::backend::traits::LearningBackend;
use crate::error::LearningApiError;
use crate::types::{LearningPath, SubmissionOutcome, TopicContent};

/// Roadmap assembly over a learning backend.
pub struct RoadmapService<B: LearningBackend + ?Sized = dyn LearningBackend> {
    backend: Arc<B>,
    config: RoadmapConfig,
}

impl<B: LearningBackend + ?Sized> RoadmapService<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self::with_config(backend, RoadmapConfig::default())
    }

    pub fn with_config(backend: Arc<B>, config: RoadmapConfig) -> Self {
        Self { backend, config }
    }

    pub fn backend(&self) -> &Arc<B> {
        &self.backend
    }

    pub fn config(&self) -> &RoadmapConfig {
        &self.config
    }

    /// Build the roadmap for a level.
    ///
    /// Uses the personalized path when one exists; otherwise the builtin
    /// catalog with empty progress. Bad status strings in the path fail the
    /// whole load with [`LearningApiError::InvalidProgress`].
    pub async fn load_roadmap(
        &self,
        language: Language,
        level: Level,
        mode: UnlockMode,
    ) -> Result<Roadmap, LearningApiError> {
        let path = self.backend.get_learning_path(language, level).await?;
        assemble(CatalogKey::new(language, level), path, mode)
    }

    /// Roadmap for the selected level, or the overview when none is selected.
    ///
    /// The overview shows the first level with a generated path, falling back
    /// to the builtin beginner track.
    pub async fn load_selected(
        &self,
        language: Language,
        selected: Option<Level>,
    ) -> Result<Roadmap, LearningApiError> {
        match selected {
            Some(level) => self.load_roadmap(language, level, UnlockMode::LevelActive).await,
            None => {
                let (level, path) = match self.first_generated_path(language).await? {
                    Some(path) => (path.level, Some(path)),
                    None => (Level::Beginner, None),
                };
                assemble(
                    CatalogKey::new(language, level),
                    path,
                    self.config.default_mode,
                )
            }
        }
    }

    /// First level, in track order, with a stored path.
    pub async fn first_generated_level(
        &self,
        language: Language,
    ) -> Result<Option<Level>, LearningApiError> {
        Ok(self.first_generated_path(language).await?.map(|p| p.level))
    }

    async fn first_generated_path(
        &self,
        language: Language,
    ) -> Result<Option<LearningPath>, LearningApiError> {
        for level in Level::all() {
            if let Some(path) = self.backend.get_learning_path(language, level).await? {
                return Ok(Some(path));
            }
        }
        Ok(None)
    }

    /// Generate a personalized path for a level from placement results.
    ///
    /// The builtin catalog is offered as the available topics.
    pub async fn generate_path(
        &self,
        language: Language,
        level: Level,
        quiz_results: Vec<SubmissionItem>,
    ) -> Result<TopicCatalog, LearningApiError> {
        let key = CatalogKey::new(language, level);
        let available = TopicCatalog::builtin(key).topics().to_vec();
        let path = self
            .backend
            .generate_learning_path(language, level, quiz_results, available)
            .await?;
        let (catalog, _) = split_path(key, path)?;
        info!(%key, topic_count = catalog.len(), "Generated learning path");
        Ok(catalog)
    }

    /// Drop the personalized path; the builtin catalog applies again.
    pub async fn reset_path(&self, language: Language, level: Level) -> Result<(), LearningApiError> {
        self.backend.reset_learning_path(language, level).await?;
        info!(%language, %level, "Reset learning path");
        Ok(())
    }

    /// Mastery the session would earn under the configured threshold.
    pub fn preview_status(&self, session: &QuizSession) -> MasteryStatus {
        self.config.mastery_threshold().classify(&session.score())
    }

    /// Fetch lesson content and quiz for an open topic.
    ///
    /// Fails with [`LearningApiError::TopicLocked`] for a topic the roadmap
    /// does not currently open.
    pub async fn open_topic(
        &self,
        roadmap: &Roadmap,
        topic_id: &TopicId,
    ) -> Result<TopicContent, LearningApiError> {
        ensure_open(roadmap, topic_id)?;
        let language = roadmap.catalog().key().language;
        let content = self.backend.get_topic_content(language, topic_id).await?;
        debug!(
            topic_id = %topic_id,
            status = content.status.as_str(),
            questions = content.quiz.len(),
            "Opened topic"
        );
        Ok(content)
    }

    /// Submit a finished topic quiz and apply the verdict to the roadmap.
    ///
    /// Returns the backend's outcome; `roadmap` is updated in place so the
    /// next topic opens without a reload when the topic is mastered. Locked
    /// and unknown topics are rejected before anything is sent.
    pub async fn submit_quiz(
        &self,
        roadmap: &mut Roadmap,
        topic_id: &TopicId,
        session: &QuizSession,
    ) -> Result<SubmissionOutcome, LearningApiError> {
        ensure_open(roadmap, topic_id)?;
        let language = roadmap.catalog().key().language;
        let outcome = self
            .backend
            .submit_topic_quiz(language, topic_id, session.submission(), session.len())
            .await?;

        let progress = roadmap.progress().with_status(topic_id.clone(), outcome.status);
        roadmap.set_progress(progress);
        debug!(
            topic_id = %topic_id,
            status = outcome.status.as_str(),
            score = outcome.score,
            "Applied quiz outcome"
        );
        Ok(outcome)
    }
}

fn ensure_open(roadmap: &Roadmap, topic_id: &TopicId) -> Result<(), LearningApiError> {
    if roadmap.is_interactive(topic_id) {
        return Ok(());
    }
    warn!(topic_id = %topic_id, mode = ?roadmap.mode(), "Rejected access to locked topic");
    Err(LearningApiError::TopicLocked(topic_id.clone()))
}

fn assemble(
    key: CatalogKey,
    path: Option<LearningPath>,
    mode: UnlockMode,
) -> Result<Roadmap, LearningApiError> {
    let (catalog, progress) = match path {
        Some(path) => split_path(key, path)?,
        None => {
            debug!(%key, "No personalized path, using builtin catalog");
            (CatalogSet::resolve(key, None), ProgressMap::new())
        }
    };

    debug!(
        %key,
        topic_count = catalog.len(),
        mastered = progress.iter().filter(|(_, s)| s.is_mastered()).count(),
        "Loaded roadmap"
    );
    Ok(Roadmap::new(catalog, progress, mode))
}

/// Split a path, checking it belongs to the requested key.
fn split_path(
    key: CatalogKey,
    path: LearningPath,
) -> Result<(TopicCatalog, ProgressMap), LearningApiError> {
    if path.key() != key {
        return Err(LearningApiError::Parse(format!(
            "Requested path {} but received {}",
            key,
            path.key()
        )));
    }
    path.into_parts()
}
