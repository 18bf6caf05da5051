//! Topic catalogs.
//!
//! A catalog is the fixed, ordered list of topics for one (language, level).
//! The builtin tracks are used until the backend has generated a personalized
//! ordering for the learner, which then replaces the builtin one wholesale.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::types::{CatalogKey, Language, Level, Topic, TopicId};

/// Error types for catalog construction.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The same topic id appears twice in one catalog
    #[error("Duplicate topic {topic_id} in catalog {key}")]
    DuplicateTopic { key: CatalogKey, topic_id: TopicId },
}

/// Ordered topic list for one (language, level) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CatalogParts")]
pub struct TopicCatalog {
    key: CatalogKey,
    topics: Vec<Topic>,
}

impl TopicCatalog {
    /// Build a catalog, rejecting duplicate topic ids.
    pub fn new(key: CatalogKey, topics: Vec<Topic>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(topics.len());
        for topic in &topics {
            if !seen.insert(&topic.id) {
                return Err(CatalogError::DuplicateTopic {
                    key,
                    topic_id: topic.id.clone(),
                });
            }
        }
        Ok(Self { key, topics })
    }

    /// The default track shipped with the product.
    pub fn builtin(key: CatalogKey) -> Self {
        let titles = builtin_titles(key);
        let first_id: u32 = match key.level {
            Level::Beginner => 1,
            Level::Intermediate => 6,
            Level::Expert => 11,
        };
        let topics = titles
            .iter()
            .zip(first_id..)
            .map(|(title, id)| Topic::new(id, *title))
            .collect();
        Self { key, topics }
    }

    pub fn key(&self) -> CatalogKey {
        self.key
    }

    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    pub fn get(&self, id: &TopicId) -> Option<&Topic> {
        self.topics.iter().find(|t| &t.id == id)
    }

    /// Position of a topic in prerequisite order.
    pub fn position(&self, id: &TopicId) -> Option<usize> {
        self.topics.iter().position(|t| &t.id == id)
    }
}

/// Unvalidated wire form; deserialization goes through [`TopicCatalog::new`].
#[derive(Deserialize)]
struct CatalogParts {
    key: CatalogKey,
    topics: Vec<Topic>,
}

impl TryFrom<CatalogParts> for TopicCatalog {
    type Error = CatalogError;

    fn try_from(parts: CatalogParts) -> Result<Self, Self::Error> {
        Self::new(parts.key, parts.topics)
    }
}

/// Catalogs for every track, with personalized orderings layered over the
/// builtin ones.
#[derive(Debug, Clone, Default)]
pub struct CatalogSet {
    personalized: HashMap<CatalogKey, TopicCatalog>,
}

impl CatalogSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a personalized catalog, replacing any previous one for its key.
    pub fn insert_personalized(&mut self, catalog: TopicCatalog) {
        tracing::debug!(
            key = %catalog.key(),
            topic_count = catalog.len(),
            "Stored personalized catalog"
        );
        self.personalized.insert(catalog.key(), catalog);
    }

    /// Drop the personalized catalog for a key, reverting to the builtin one.
    pub fn reset(&mut self, key: CatalogKey) -> Option<TopicCatalog> {
        self.personalized.remove(&key)
    }

    pub fn has_personalized(&self, key: CatalogKey) -> bool {
        self.personalized.contains_key(&key)
    }

    /// Catalog in effect for a key.
    pub fn get(&self, key: CatalogKey) -> TopicCatalog {
        Self::resolve(key, self.personalized.get(&key).cloned())
    }

    /// The personalized catalog when present, otherwise the builtin track.
    pub fn resolve(key: CatalogKey, personalized: Option<TopicCatalog>) -> TopicCatalog {
        personalized.unwrap_or_else(|| TopicCatalog::builtin(key))
    }

    /// First level, in track order, that has a personalized catalog.
    pub fn first_personalized_level(&self, language: Language) -> Option<Level> {
        Level::all()
            .into_iter()
            .find(|level| self.has_personalized(CatalogKey::new(language, *level)))
    }
}

fn builtin_titles(key: CatalogKey) -> [&'static str; 5] {
    match (key.language, key.level) {
        (Language::Python, Level::Beginner) => [
            "Variables & Data Types",
            "Operators & Expressions",
            "Control Flow (if / else)",
            "Loops (for / while)",
            "Functions (Basics)",
        ],
        (Language::Python, Level::Intermediate) => [
            "Data Structures",
            "String & List Manipulation",
            "File Handling",
            "Exception Handling",
            "Functions (Advanced)",
        ],
        (Language::Python, Level::Expert) => [
            "OOP in Python",
            "Modules & Packages",
            "Working with APIs",
            "Algorithms Basics",
            "Mini Project",
        ],
        (Language::Java, Level::Beginner) => [
            "Variables & Data Types",
            "Operators & Expressions",
            "Control Flow (if / else)",
            "Loops (for / while)",
            "Methods (Basics)",
        ],
        (Language::Java, Level::Intermediate) => [
            "Data Structures",
            "String & Arrays",
            "File Handling",
            "Exception Handling",
            "Methods (Advanced)",
        ],
        (Language::Java, Level::Expert) => [
            "OOP in Java",
            "Packages & Interfaces",
            "Multithreading",
            "Collections Framework",
            "Mini Project (JDBC)",
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> CatalogKey {
        CatalogKey::new(Language::Python, Level::Beginner)
    }

    #[test]
    fn test_builtin_catalogs_have_five_unique_topics() {
        for language in Language::all() {
            let mut all_ids = HashSet::new();
            for level in Level::all() {
                let catalog = TopicCatalog::builtin(CatalogKey::new(language, level));
                assert_eq!(catalog.len(), 5);
                for topic in catalog.topics() {
                    assert!(all_ids.insert(topic.id.clone()), "duplicate {}", topic.id);
                }
            }
            assert_eq!(all_ids.len(), 15);
        }
    }

    #[test]
    fn test_builtin_ids_continue_across_levels() {
        let expert = TopicCatalog::builtin(CatalogKey::new(Language::Java, Level::Expert));
        assert_eq!(expert.topics()[0].id, TopicId::from("11"));
        assert_eq!(expert.topics()[0].title, "OOP in Java");
        assert_eq!(expert.topics()[4].id, TopicId::from("15"));
    }

    #[test]
    fn test_deserialize_rejects_duplicates() {
        let json = r#"{
            "key": {"language": "python", "level": "beginner"},
            "topics": [{"id": 1, "title": "A"}, {"id": "1", "title": "B"}]
        }"#;
        let err = serde_json::from_str::<TopicCatalog>(json).unwrap_err();
        assert!(err.to_string().contains("Duplicate topic 1"), "{err}");

        let catalog = TopicCatalog::builtin(key());
        let encoded = serde_json::to_string(&catalog).unwrap();
        assert_eq!(serde_json::from_str::<TopicCatalog>(&encoded).unwrap(), catalog);
    }

    #[test]
    fn test_duplicate_topic_rejected() {
        let result = TopicCatalog::new(
            key(),
            vec![Topic::new("a", "A"), Topic::new("b", "B"), Topic::new("a", "A again")],
        );
        match result {
            Err(CatalogError::DuplicateTopic { topic_id, .. }) => {
                assert_eq!(topic_id, TopicId::from("a"))
            }
            other => panic!("expected duplicate error, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_catalog_is_valid() {
        let catalog = TopicCatalog::new(key(), Vec::new()).unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_personalized_replaces_builtin() {
        let mut set = CatalogSet::new();
        assert_eq!(set.get(key()).len(), 5);
        assert_eq!(set.first_personalized_level(Language::Python), None);

        let custom = TopicCatalog::new(
            CatalogKey::new(Language::Python, Level::Intermediate),
            vec![Topic::new("9", "Exception Handling"), Topic::new("6", "Data Structures")],
        )
        .unwrap();
        set.insert_personalized(custom.clone());

        let resolved = set.get(custom.key());
        assert_eq!(resolved, custom);
        assert_eq!(resolved.position(&TopicId::from("6")), Some(1));
        assert_eq!(
            set.first_personalized_level(Language::Python),
            Some(Level::Intermediate)
        );

        set.reset(custom.key());
        assert_eq!(set.get(custom.key()).len(), 5);
    }
}
