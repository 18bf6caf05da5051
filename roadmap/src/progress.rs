//! Learner progress ingestion.
//!
//! Progress arrives from the backend as raw status strings. They are parsed
//! into [`MasteryStatus`] here, at the boundary, so the unlock engine only
//! ever sees well-formed data.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::{MasteryStatus, ParseVariantError, TopicId, TopicProgress};

/// Error types for progress ingestion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProgressError {
    /// A status string outside the known set
    #[error("Invalid mastery status {value:?} for topic {topic_id}")]
    InvalidStatus { topic_id: TopicId, value: String },
}

/// Mastery per topic. Missing entries read as [`MasteryStatus::NotAttempted`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgressMap {
    entries: HashMap<TopicId, MasteryStatus>,
}

impl ProgressMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse backend status strings, rejecting the whole map on the first
    /// unknown value.
    pub fn from_wire<I, K, V>(raw: I) -> Result<Self, ProgressError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<TopicId>,
        V: AsRef<str>,
    {
        let mut entries: HashMap<TopicId, MasteryStatus> = HashMap::new();
        for (id, value) in raw {
            let topic_id: TopicId = id.into();
            let status: MasteryStatus = value.as_ref().parse().map_err(|e: ParseVariantError| {
                tracing::warn!(topic_id = %topic_id, value = %e.value, "Rejected progress entry");
                ProgressError::InvalidStatus {
                    topic_id: topic_id.clone(),
                    value: e.value,
                }
            })?;
            entries.insert(topic_id, status);
        }
        tracing::debug!(entries = entries.len(), "Ingested progress");
        Ok(Self { entries })
    }

    /// Build from persisted records; later records for a topic win.
    pub fn from_records(records: &[TopicProgress]) -> Self {
        let entries = records
            .iter()
            .map(|r| (r.topic_id.clone(), r.status))
            .collect();
        Self { entries }
    }

    /// Status for a topic, defaulting to not attempted.
    pub fn status(&self, id: &TopicId) -> MasteryStatus {
        self.entries.get(id).copied().unwrap_or_default()
    }

    /// Copy of this map with one topic's status replaced.
    pub fn with_status(&self, id: impl Into<TopicId>, status: MasteryStatus) -> Self {
        let mut entries = self.entries.clone();
        entries.insert(id.into(), status);
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TopicId, MasteryStatus)> {
        self.entries.iter().map(|(id, status)| (id, *status))
    }
}

impl FromIterator<(TopicId, MasteryStatus)> for ProgressMap {
    fn from_iter<T: IntoIterator<Item = (TopicId, MasteryStatus)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
