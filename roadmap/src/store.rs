//! Learner-local state over a key-value store.
//!
//! Remembers the last level opened per language and the placement quiz
//! results per level. Storage is injected through [`KeyValueStore`], so the
//! same state logic runs against browser storage, a file, or memory.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Language, Level, ParseVariantError};

/// Error types for learner state.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Stored value could not be decoded
    #[error("Corrupt value under {key}: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Stored level string is not a known level
    #[error("Invalid stored level under {key}: {source}")]
    InvalidLevel {
        key: String,
        #[source]
        source: ParseVariantError,
    },

    /// Backing store failure
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// String key-value storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError>;

    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// In-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.values.remove(key);
        Ok(())
    }
}

/// Outcome of a level placement quiz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementResult {
    pub level: Level,
    /// Number of correct answers
    pub score: usize,
    pub date: DateTime<Utc>,
}

/// Learner state persisted through a [`KeyValueStore`].
#[derive(Debug)]
pub struct LearnerState<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> LearnerState<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    /// Level the learner last opened for a language.
    pub fn last_level(&self, language: Language) -> Result<Option<Level>, StoreError> {
        let key = last_level_key(language);
        match self.store.get(&key)? {
            Some(raw) => raw
                .parse::<Level>()
                .map(Some)
                .map_err(|source| StoreError::InvalidLevel { key, source }),
            None => Ok(None),
        }
    }

    pub fn set_last_level(&mut self, language: Language, level: Level) -> Result<(), StoreError> {
        self.store
            .set(&last_level_key(language), level.as_str().to_string())
    }

    pub fn clear_last_level(&mut self, language: Language) -> Result<(), StoreError> {
        self.store.remove(&last_level_key(language))
    }

    /// Placement results per level for a language.
    pub fn placement_results(
        &self,
        language: Language,
    ) -> Result<BTreeMap<Level, PlacementResult>, StoreError> {
        let key = placement_key(language);
        match self.store.get(&key)? {
            Some(raw) => {
                serde_json::from_str(&raw).map_err(|source| StoreError::Corrupt { key, source })
            }
            None => Ok(BTreeMap::new()),
        }
    }

    /// Record a placement result, replacing any earlier one for the level.
    pub fn record_placement(
        &mut self,
        language: Language,
        level: Level,
        score: usize,
        at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let mut results = self.placement_results(language)?;
        results.insert(
            level,
            PlacementResult {
                level,
                score,
                date: at,
            },
        );
        let encoded =
            serde_json::to_string(&results).map_err(|e| StoreError::Backend(e.to_string()))?;
        tracing::debug!(%language, %level, score, "Recorded placement result");
        self.store.set(&placement_key(language), encoded)
    }
}

fn last_level_key(language: Language) -> String {
    format!("lastLevel_{}", language)
}

fn placement_key(language: Language) -> String {
    format!("quiz_result_{}", language)
}
