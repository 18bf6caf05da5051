//! Property tests for the unlock engine and quiz scoring.
//!
//! Covers:
//! - frontier shape for arbitrary catalogs and progress maps
//! - overview mode never changing statuses
//! - quiz score independence from question order

use std::collections::HashMap;

use proptest::prelude::*;
use roadmap::{
    compute_unlock_state, frontier_index, score_quiz, MasteryStatus, ProgressMap, Question,
    QuestionId, Topic, TopicId,
};

// =============================================================================
// Generators
// =============================================================================

fn status_strategy() -> impl Strategy<Value = Option<MasteryStatus>> {
    prop_oneof![
        Just(None),
        Just(Some(MasteryStatus::NotAttempted)),
        Just(Some(MasteryStatus::Weak)),
        Just(Some(MasteryStatus::Mastered)),
    ]
}

/// Catalog of `n` topics plus a progress map with a random status (or none)
/// for each.
fn roadmap_strategy() -> impl Strategy<Value = (Vec<Topic>, ProgressMap)> {
    prop::collection::vec(status_strategy(), 0..24).prop_map(|statuses| {
        let catalog: Vec<Topic> = (0..statuses.len())
            .map(|i| Topic::new(format!("t{i}"), format!("Topic {i}")))
            .collect();
        let progress: ProgressMap = catalog
            .iter()
            .zip(statuses)
            .filter_map(|(topic, status)| status.map(|s| (topic.id.clone(), s)))
            .collect();
        (catalog, progress)
    })
}

fn catalog_of(n: usize) -> Vec<Topic> {
    (0..n).map(|i| Topic::new(format!("t{i}"), format!("Topic {i}"))).collect()
}

// =============================================================================
// Unlock engine
// =============================================================================

proptest! {
    #[test]
    fn all_mastered_is_all_interactive(n in 0usize..32) {
        let catalog = catalog_of(n);
        let progress: ProgressMap = catalog
            .iter()
            .map(|t| (t.id.clone(), MasteryStatus::Mastered))
            .collect();

        let decisions = compute_unlock_state(&catalog, &progress, false);
        prop_assert_eq!(decisions.len(), n);
        prop_assert!(decisions.iter().all(|d| d.interactive));
    }

    #[test]
    fn absent_progress_opens_only_first(n in 1usize..32) {
        let catalog = catalog_of(n);
        let decisions = compute_unlock_state(&catalog, &ProgressMap::new(), false);

        prop_assert!(decisions[0].interactive);
        prop_assert!(decisions[1..].iter().all(|d| !d.interactive));
        prop_assert!(decisions.iter().all(|d| d.status == MasteryStatus::NotAttempted));
    }

    #[test]
    fn frontier_splits_interactive_from_locked((catalog, progress) in roadmap_strategy()) {
        let decisions = compute_unlock_state(&catalog, &progress, false);
        prop_assert_eq!(decisions.len(), catalog.len());

        match frontier_index(&decisions) {
            Some(k) => {
                for (i, decision) in decisions.iter().enumerate() {
                    prop_assert_eq!(decision.interactive, i <= k, "topic {}", i);
                    if i < k {
                        prop_assert_eq!(decision.status, MasteryStatus::Mastered);
                    }
                }
            }
            None => prop_assert!(decisions.iter().all(|d| d.interactive)),
        }
    }

    #[test]
    fn decisions_follow_catalog_order((catalog, progress) in roadmap_strategy()) {
        let decisions = compute_unlock_state(&catalog, &progress, false);
        for (topic, decision) in catalog.iter().zip(&decisions) {
            prop_assert_eq!(&topic.id, &decision.topic_id);
            prop_assert_eq!(decision.status, progress.status(&topic.id));
        }
    }

    #[test]
    fn overview_only_changes_interactivity_only((catalog, progress) in roadmap_strategy()) {
        let active = compute_unlock_state(&catalog, &progress, false);
        let overview = compute_unlock_state(&catalog, &progress, true);

        prop_assert_eq!(active.len(), overview.len());
        for (a, o) in active.iter().zip(&overview) {
            prop_assert!(!o.interactive);
            prop_assert_eq!(&a.topic_id, &o.topic_id);
            prop_assert_eq!(a.status, o.status);
        }
    }
}

// =============================================================================
// Quiz scoring
// =============================================================================

proptest! {
    #[test]
    fn score_is_independent_of_question_order(
        answered in prop::collection::vec(prop::option::of(any::<bool>()), 0..20),
        seed in any::<u64>(),
    ) {
        let questions: Vec<Question> = (0..answered.len() as u32)
            .map(|i| Question::new(i, format!("opt{i}")))
            .collect();
        let answers: HashMap<QuestionId, String> = questions
            .iter()
            .zip(&answered)
            .filter_map(|(q, a)| {
                a.map(|correct| {
                    let answer = if correct { q.correct_option.clone() } else { "wrong".to_string() };
                    (q.id.clone(), answer)
                })
            })
            .collect();

        // Deterministic shuffle driven by the seed
        let mut shuffled = questions.clone();
        let mut state = seed;
        for i in (1..shuffled.len()).rev() {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let j = (state >> 33) as usize % (i + 1);
            shuffled.swap(i, j);
        }

        let original = score_quiz(&questions, &answers);
        let permuted = score_quiz(&shuffled, &answers);
        prop_assert_eq!(original, permuted);
        prop_assert_eq!(original.total, questions.len());
        prop_assert!(original.percentage >= 0.0 && original.percentage <= 100.0);
    }
}

// =============================================================================
// Concrete scenarios
// =============================================================================

#[test]
fn scenario_mastered_then_weak() {
    let catalog = catalog_of(4);
    let progress = ProgressMap::from_wire([("t0", "MASTERED"), ("t1", "WEAK")]).unwrap();

    let decisions = compute_unlock_state(&catalog, &progress, false);
    let summary: Vec<(&str, MasteryStatus, bool)> = decisions
        .iter()
        .map(|d| (d.topic_id.as_str(), d.status, d.interactive))
        .collect();

    assert_eq!(
        summary,
        vec![
            ("t0", MasteryStatus::Mastered, true),
            ("t1", MasteryStatus::Weak, true),
            ("t2", MasteryStatus::NotAttempted, false),
            ("t3", MasteryStatus::NotAttempted, false),
        ]
    );
}

#[test]
fn scenario_three_mastered() {
    let catalog = catalog_of(3);
    let progress =
        ProgressMap::from_wire([("t0", "MASTERED"), ("t1", "MASTERED"), ("t2", "MASTERED")])
            .unwrap();

    let decisions = compute_unlock_state(&catalog, &progress, false);
    assert!(decisions.iter().all(|d| d.interactive));
}

#[test]
fn scenario_half_score() {
    let questions = vec![Question::new(1u32, "x"), Question::new(2u32, "y")];
    let answers: HashMap<QuestionId, String> =
        [(QuestionId::from(1u32), "x".to_string())].into_iter().collect();

    let score = score_quiz(&questions, &answers);
    assert_eq!(score.correct_count, 1);
    assert_eq!(score.total, 2);
    assert_eq!(score.percentage, 50.0);
}

#[test]
fn scenario_empty_quiz() {
    let score = score_quiz(&[], &HashMap::new());
    assert_eq!(score.percentage, 0.0);
}

#[test]
fn unknown_topic_id_in_progress_is_ignored() {
    let catalog = catalog_of(2);
    let progress = ProgressMap::new().with_status(TopicId::from("other"), MasteryStatus::Mastered);
    let decisions = compute_unlock_state(&catalog, &progress, false);
    assert_eq!(
        decisions.iter().map(|d| d.interactive).collect::<Vec<_>>(),
        vec![true, false]
    );
}
