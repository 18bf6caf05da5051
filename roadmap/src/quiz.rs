//! Quiz scoring and mastery classification.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[cfg(feature = "typescript")]
use ts_rs::TS;

use crate::types::{MasteryStatus, Question, QuestionId, QuizScore};

/// Score a quiz against the learner's selections.
///
/// Answers are matched by question id, so the result does not depend on the
/// order questions were shown in. A missing answer counts as incorrect and an
/// empty quiz scores 0 %.
pub fn score_quiz(questions: &[Question], answers: &HashMap<QuestionId, String>) -> QuizScore {
    let total = questions.len();
    let correct_count = questions
        .iter()
        .filter(|q| answers.get(&q.id) == Some(&q.correct_option))
        .count();
    let percentage = if total == 0 {
        0.0
    } else {
        correct_count as f64 / total as f64 * 100.0
    };

    QuizScore {
        correct_count,
        total,
        percentage,
    }
}

/// Percentage at or above which a topic counts as mastered.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct MasteryThreshold(f64);

impl MasteryThreshold {
    pub const DEFAULT_PERCENT: f64 = 70.0;

    /// Threshold clamped to 0 - 100.
    pub fn new(percent: f64) -> Self {
        Self(percent.clamp(0.0, 100.0))
    }

    pub fn percent(&self) -> f64 {
        self.0
    }

    pub fn classify(&self, score: &QuizScore) -> MasteryStatus {
        if score.percentage >= self.0 {
            MasteryStatus::Mastered
        } else {
            MasteryStatus::Weak
        }
    }
}

impl From<f64> for MasteryThreshold {
    fn from(percent: f64) -> Self {
        Self::new(percent)
    }
}

impl From<MasteryThreshold> for f64 {
    fn from(threshold: MasteryThreshold) -> Self {
        threshold.0
    }
}

impl Default for MasteryThreshold {
    fn default() -> Self {
        Self(Self::DEFAULT_PERCENT)
    }
}

/// One answered question as submitted to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct SubmissionItem {
    pub question_id: QuestionId,
    pub question: String,
    pub selected_option: String,
    pub correct_option: String,
    pub is_correct: bool,
}

/// Build the per-question submission payload, in question order.
pub fn build_submission(
    questions: &[Question],
    answers: &HashMap<QuestionId, String>,
) -> Vec<SubmissionItem> {
    questions
        .iter()
        .map(|q| {
            let selected = answers.get(&q.id).cloned().unwrap_or_default();
            SubmissionItem {
                question_id: q.id.clone(),
                question: q.prompt.clone(),
                is_correct: selected == q.correct_option,
                selected_option: selected,
                correct_option: q.correct_option.clone(),
            }
        })
        .collect()
}

/// Walks a learner through a question list one question at a time.
#[derive(Debug, Clone)]
pub struct QuizSession {
    questions: Vec<Question>,
    index: usize,
    selected: Option<String>,
    answers: HashMap<QuestionId, String>,
}

impl QuizSession {
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions,
            index: 0,
            selected: None,
            answers: HashMap::new(),
        }
    }

    /// Question being shown, or `None` once every question is answered.
    pub fn current(&self) -> Option<&Question> {
        self.questions.get(self.index)
    }

    pub fn position(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Select an option for the current question. Ignored when complete.
    pub fn select(&mut self, option: impl Into<String>) {
        if self.current().is_some() {
            self.selected = Some(option.into());
        }
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Record the current selection (if any) and move to the next question.
    ///
    /// Returns `true` while questions remain.
    pub fn advance(&mut self) -> bool {
        let Some(question) = self.questions.get(self.index) else {
            return false;
        };
        if let Some(option) = self.selected.take() {
            self.answers.insert(question.id.clone(), option);
        }
        self.index += 1;
        !self.is_complete()
    }

    pub fn is_complete(&self) -> bool {
        self.index >= self.questions.len()
    }

    /// Fraction of questions reached, 0.0 - 100.0.
    pub fn progress_percent(&self) -> f64 {
        if self.questions.is_empty() {
            return 0.0;
        }
        let shown = (self.index + 1).min(self.questions.len());
        shown as f64 / self.questions.len() as f64 * 100.0
    }

    pub fn answers(&self) -> &HashMap<QuestionId, String> {
        &self.answers
    }

    pub fn score(&self) -> QuizScore {
        score_quiz(&self.questions, &self.answers)
    }

    pub fn submission(&self) -> Vec<SubmissionItem> {
        build_submission(&self.questions, &self.answers)
    }
}
