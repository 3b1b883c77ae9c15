//! Marker-scan suspicion scoring. Deterministic, no I/O.

use async_trait::async_trait;
use fk_core::Suspect;

use super::SuspicionPolicy;

/// Hedging and evasion markers; each occurrence adds [`MARKER_STEP`].
const MARKERS: &[&str] = &[
    "avoid",
    "confuse",
    "contrad",
    "maybe",
    "think",
    "unsure",
    "don't recall",
    "forgot",
];

const MARKER_STEP: f64 = 0.3;
const ALIBI_SHIFT_STEP: f64 = 0.5;
const DELTA_MIN: f64 = -0.2;
const DELTA_MAX: f64 = 0.8;

/// Scores answers by scanning for evasive phrasing.
///
/// Each marker found in the lowercased answer adds `0.3`; mentioning an
/// alibi together with "changed" or "different" adds `0.5`; the final delta
/// is clamped to `[-0.2, 0.8]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicPolicy;

#[async_trait]
impl SuspicionPolicy for HeuristicPolicy {
    async fn score(
        &self,
        _scenario_summary: &str,
        _suspect: &Suspect,
        _last_question: &str,
        last_answer: &str,
        _current_score: f64,
    ) -> f64 {
        let lower = last_answer.to_lowercase();
        let mut delta = 0.0;
        for marker in MARKERS {
            if lower.contains(marker) {
                delta += MARKER_STEP;
            }
        }
        if lower.contains("alibi") && (lower.contains("changed") || lower.contains("different")) {
            delta += ALIBI_SHIFT_STEP;
        }
        delta.clamp(DELTA_MIN, DELTA_MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suspect() -> Suspect {
        Suspect {
            id: fk_core::SuspectId::from("s1"),
            name: "Ava Morgan".to_string(),
            occupation: "caterer".to_string(),
            bio: String::new(),
            alibi: String::new(),
        }
    }

    async fn delta(answer: &str) -> f64 {
        HeuristicPolicy.score("", &suspect(), "", answer, 0.0).await
    }

    #[tokio::test]
    async fn neutral_answer_scores_zero() {
        assert_eq!(delta("I was in the kitchen all evening.").await, 0.0);
    }

    #[tokio::test]
    async fn single_marker() {
        assert_eq!(delta("Maybe it was later.").await, 0.3);
    }

    #[tokio::test]
    async fn three_markers_clamp_to_max() {
        // "don't recall", "maybe", "contrad" = 0.9, clamped to 0.8.
        let d = delta("I don't recall, maybe it was a contradiction").await;
        assert_eq!(d, 0.8);
    }

    #[tokio::test]
    async fn alibi_shift_bonus() {
        assert_eq!(delta("My alibi changed since last time.").await, 0.5);
    }

    #[tokio::test]
    async fn case_insensitive() {
        assert_eq!(delta("MAYBE I FORGOT.").await, 0.6);
    }
}
