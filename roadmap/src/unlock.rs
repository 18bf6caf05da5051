//! Sequential topic unlock engine.
//!
//! Given an ordered catalog and a mastery map, decides which topics a learner
//! may open. Progression is strictly linear:
//!
//! - every leading `MASTERED` topic stays open for review
//! - the first topic that is not `MASTERED` is the frontier and is open
//! - everything after the frontier is locked, whatever its stored status
//!
//! A `WEAK` topic is the frontier (eligible for retry) but never opens the
//! next one. Mastery recorded after a gap is not trusted.
//!
//! Everything else in this module derives from [`compute_unlock_state`]; there
//! is exactly one implementation of the unlock rule.

use serde::{Deserialize, Serialize};

#[cfg(feature = "typescript")]
use ts_rs::TS;

use crate::catalog::TopicCatalog;
use crate::progress::ProgressMap;
use crate::types::{MasteryStatus, Topic, UnlockDecision};

/// Compute the unlock decision for every topic, in catalog order.
///
/// With `overview_only` set every decision is non-interactive, while the
/// statuses stay identical to the level-active computation.
pub fn compute_unlock_state(
    catalog: &[Topic],
    progress: &ProgressMap,
    overview_only: bool,
) -> Vec<UnlockDecision> {
    let mut sequence_open = true;
    let decisions: Vec<UnlockDecision> = catalog
        .iter()
        .map(|topic| {
            let status = progress.status(&topic.id);
            let interactive = sequence_open && !overview_only;
            if status != MasteryStatus::Mastered {
                sequence_open = false;
            }
            UnlockDecision {
                topic_id: topic.id.clone(),
                status,
                interactive,
            }
        })
        .collect();

    tracing::debug!(
        topic_count = decisions.len(),
        overview_only,
        "Computed unlock state"
    );
    decisions
}

/// How a roadmap view is being shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum UnlockMode {
    /// Preview of a whole track; nothing is clickable
    Overview,
    /// A level is selected and the sequential frontier applies
    #[default]
    LevelActive,
}

impl UnlockMode {
    pub fn overview_only(&self) -> bool {
        matches!(self, Self::Overview)
    }
}

/// Index of the frontier topic: the first one not yet mastered.
///
/// `None` when every topic is mastered (or the catalog is empty).
pub fn frontier_index(decisions: &[UnlockDecision]) -> Option<usize> {
    decisions.iter().position(|d| !d.status.is_mastered())
}

/// A level earns its certificate once every topic in it is mastered.
pub fn is_certificate_eligible(decisions: &[UnlockDecision]) -> bool {
    !decisions.is_empty() && decisions.iter().all(|d| d.status.is_mastered())
}

/// Visual state of a topic card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum TopicPresentation {
    Mastered,
    NeedsReview,
    Unlocked,
    Locked,
}

impl TopicPresentation {
    /// Classify one decision.
    ///
    /// Status badges only show on reachable topics, so a stale `MASTERED`
    /// behind the frontier still renders as locked.
    pub fn of(decision: &UnlockDecision) -> Self {
        if !decision.interactive {
            return Self::Locked;
        }
        match decision.status {
            MasteryStatus::Mastered => Self::Mastered,
            MasteryStatus::Weak => Self::NeedsReview,
            MasteryStatus::NotAttempted => Self::Unlocked,
        }
    }
}

/// Aggregate counts over one level's decisions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct RoadmapSummary {
    pub total: usize,
    pub mastered: usize,
    pub weak: usize,
    pub not_attempted: usize,
    pub interactive: usize,
    /// Share of mastered topics, 0.0 - 100.0
    pub completion_percent: f64,
}

impl RoadmapSummary {
    pub fn from_decisions(decisions: &[UnlockDecision]) -> Self {
        let mut summary = Self {
            total: decisions.len(),
            ..Default::default()
        };
        for decision in decisions {
            match decision.status {
                MasteryStatus::Mastered => summary.mastered += 1,
                MasteryStatus::Weak => summary.weak += 1,
                MasteryStatus::NotAttempted => summary.not_attempted += 1,
            }
            if decision.interactive {
                summary.interactive += 1;
            }
        }
        if summary.total > 0 {
            summary.completion_percent = summary.mastered as f64 / summary.total as f64 * 100.0;
        }
        summary
    }
}

/// Catalog, progress and mode for one roadmap view.
///
/// Holds inputs only; decisions are recomputed on every read so they can
/// never drift from the inputs.
#[derive(Debug, Clone)]
pub struct Roadmap {
    catalog: TopicCatalog,
    progress: ProgressMap,
    mode: UnlockMode,
}

impl Roadmap {
    pub fn new(catalog: TopicCatalog, progress: ProgressMap, mode: UnlockMode) -> Self {
        Self {
            catalog,
            progress,
            mode,
        }
    }

    pub fn catalog(&self) -> &TopicCatalog {
        &self.catalog
    }

    pub fn progress(&self) -> &ProgressMap {
        &self.progress
    }

    pub fn mode(&self) -> UnlockMode {
        self.mode
    }

    pub fn set_progress(&mut self, progress: ProgressMap) {
        self.progress = progress;
    }

    pub fn set_mode(&mut self, mode: UnlockMode) {
        self.mode = mode;
    }

    pub fn decisions(&self) -> Vec<UnlockDecision> {
        compute_unlock_state(
            self.catalog.topics(),
            &self.progress,
            self.mode.overview_only(),
        )
    }

    /// Whether a topic may be opened right now. Unknown topics are not.
    pub fn is_interactive(&self, topic: &crate::types::TopicId) -> bool {
        self.decisions()
            .iter()
            .any(|d| &d.topic_id == topic && d.interactive)
    }

    pub fn frontier(&self) -> Option<&Topic> {
        frontier_index(&self.decisions()).map(|i| &self.catalog.topics()[i])
    }

    pub fn summary(&self) -> RoadmapSummary {
        RoadmapSummary::from_decisions(&self.decisions())
    }

    pub fn is_certificate_eligible(&self) -> bool {
        is_certificate_eligible(&self.decisions())
    }
}
