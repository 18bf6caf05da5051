//! Core types for the roadmap.
//!
//! These types model a learning track: an ordered catalog of topics per
//! (language, level), the learner's mastery per topic, and the derived unlock
//! decisions the presentation layer renders.
//!
//! With the `typescript` feature enabled, these types can be exported to TypeScript
//! using ts-rs for consistency with the web frontend.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// Error returned when a wire string does not name a known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value:?}")]
pub struct ParseVariantError {
    /// Which enum was being parsed
    pub kind: &'static str,
    /// The rejected input
    pub value: String,
}

impl ParseVariantError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Ids arrive from the backend either as JSON numbers or strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum IdRepr {
    Text(String),
    Number(i64),
}

impl From<IdRepr> for String {
    fn from(repr: IdRepr) -> Self {
        match repr {
            IdRepr::Text(s) => s,
            IdRepr::Number(n) => n.to_string(),
        }
    }
}

/// Stable identifier of a topic, unique within one catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(transparent)]
pub struct TopicId(String);

impl TopicId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for TopicId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        IdRepr::deserialize(deserializer).map(|repr| Self(repr.into()))
    }
}

impl fmt::Display for TopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TopicId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for TopicId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<u32> for TopicId {
    fn from(id: u32) -> Self {
        Self(id.to_string())
    }
}

/// Identifier of a quiz question.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(transparent)]
pub struct QuestionId(String);

impl QuestionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for QuestionId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        IdRepr::deserialize(deserializer).map(|repr| Self(repr.into()))
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for QuestionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<u32> for QuestionId {
    fn from(id: u32) -> Self {
        Self(id.to_string())
    }
}

/// A learner's recorded outcome on a topic's assessment.
///
/// Matches the backend `TopicStatus` strings exactly; anything else is
/// rejected when progress data is ingested.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MasteryStatus {
    /// No submission recorded
    #[default]
    NotAttempted,
    /// Attempted, scored below the mastery threshold
    Weak,
    /// Attempted, scored at or above the mastery threshold
    Mastered,
}

impl MasteryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotAttempted => "NOT_ATTEMPTED",
            Self::Weak => "WEAK",
            Self::Mastered => "MASTERED",
        }
    }

    pub fn is_mastered(&self) -> bool {
        matches!(self, Self::Mastered)
    }
}

impl fmt::Display for MasteryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MasteryStatus {
    type Err = ParseVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NOT_ATTEMPTED" => Ok(Self::NotAttempted),
            "WEAK" => Ok(Self::Weak),
            "MASTERED" => Ok(Self::Mastered),
            other => Err(ParseVariantError::new("mastery status", other)),
        }
    }
}

/// Programming language of a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    Java,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Python => "python",
            Self::Java => "java",
        }
    }

    pub fn all() -> [Self; 2] {
        [Self::Python, Self::Java]
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = ParseVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "python" => Ok(Self::Python),
            "java" => Ok(Self::Java),
            other => Err(ParseVariantError::new("language", other)),
        }
    }
}

/// Difficulty level within a language track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Beginner,
    Intermediate,
    Expert,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Expert => "expert",
        }
    }

    /// All levels in track order.
    pub fn all() -> [Self; 3] {
        [Self::Beginner, Self::Intermediate, Self::Expert]
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = ParseVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "expert" => Ok(Self::Expert),
            other => Err(ParseVariantError::new("level", other)),
        }
    }
}

/// Identifies one catalog: a (language, level) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct CatalogKey {
    pub language: Language,
    pub level: Level,
}

impl CatalogKey {
    pub fn new(language: Language, level: Level) -> Self {
        Self { language, level }
    }
}

impl fmt::Display for CatalogKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.language, self.level)
    }
}

/// A single unit of curriculum content.
///
/// Its position in the catalog defines prerequisite order; the title is
/// display-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct Topic {
    pub id: TopicId,
    pub title: String,
}

impl Topic {
    pub fn new(id: impl Into<TopicId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

/// Derived per-topic unlock result. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct UnlockDecision {
    pub topic_id: TopicId,
    pub status: MasteryStatus,
    /// Whether the learner may open this topic right now
    pub interactive: bool,
}

/// A multiple-choice quiz question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: QuestionId,
    #[serde(default, alias = "question")]
    pub prompt: String,
    #[serde(default)]
    pub options: Vec<String>,
    /// Topic content sends `correctAnswer`, placement data `answer`
    #[serde(alias = "correctAnswer", alias = "answer")]
    pub correct_option: String,
}

impl Question {
    pub fn new(id: impl Into<QuestionId>, correct_option: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            prompt: String::new(),
            options: Vec::new(),
            correct_option: correct_option.into(),
        }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>, options: Vec<String>) -> Self {
        self.prompt = prompt.into();
        self.options = options;
        self
    }
}

/// Result of scoring a quiz.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct QuizScore {
    pub correct_count: usize,
    pub total: usize,
    /// 0.0 - 100.0
    pub percentage: f64,
}

/// Per-topic progress record as the backend persists it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct TopicProgress {
    pub topic_id: TopicId,
    #[serde(default)]
    pub status: MasteryStatus,
    #[serde(default)]
    pub last_score: Option<f64>,
    #[serde(default)]
    pub attempts: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mastery_status_wire_form() {
        assert_eq!(
            serde_json::to_string(&MasteryStatus::NotAttempted).unwrap(),
            "\"NOT_ATTEMPTED\""
        );
        let parsed: MasteryStatus = serde_json::from_str("\"WEAK\"").unwrap();
        assert_eq!(parsed, MasteryStatus::Weak);
        assert!(serde_json::from_str::<MasteryStatus>("\"LOCKED\"").is_err());
    }

    #[test]
    fn test_mastery_status_from_str_is_case_sensitive() {
        assert_eq!("MASTERED".parse::<MasteryStatus>(), Ok(MasteryStatus::Mastered));
        let err = "mastered".parse::<MasteryStatus>().unwrap_err();
        assert_eq!(err.value, "mastered");
    }

    #[test]
    fn test_topic_id_accepts_numbers_and_strings() {
        let numeric: Topic = serde_json::from_str(r#"{"id": 3, "title": "Loops"}"#).unwrap();
        let text: Topic = serde_json::from_str(r#"{"id": "3", "title": "Loops"}"#).unwrap();
        assert_eq!(numeric.id, text.id);
        assert_eq!(numeric.id.as_str(), "3");
    }

    #[test]
    fn test_unlock_decision_is_camel_case() {
        let decision = UnlockDecision {
            topic_id: TopicId::from("a"),
            status: MasteryStatus::Weak,
            interactive: true,
        };
        let json = serde_json::to_value(&decision).unwrap();
        assert_eq!(json["topicId"], "a");
        assert_eq!(json["status"], "WEAK");
    }

    #[test]
    fn test_level_order() {
        assert_eq!(
            Level::all(),
            [Level::Beginner, Level::Intermediate, Level::Expert]
        );
        assert_eq!("expert".parse::<Level>(), Ok(Level::Expert));
        assert!("advanced".parse::<Level>().is_err());
    }

    #[test]
    fn test_question_accepts_backend_field_names() {
        let topic_quiz: Question = serde_json::from_str(
            r#"{"id": 101, "question": "Q?", "options": ["a", "b"], "correctAnswer": "b"}"#,
        )
        .unwrap();
        assert_eq!(topic_quiz.id, QuestionId::from(101u32));
        assert_eq!(topic_quiz.prompt, "Q?");
        assert_eq!(topic_quiz.correct_option, "b");

        let placement: Question =
            serde_json::from_str(r#"{"id": "p1", "question": "Q?", "answer": "a"}"#).unwrap();
        assert_eq!(placement.correct_option, "a");
    }
}
