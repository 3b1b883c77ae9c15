//! Per-suspect suspicion scores, bounded to `[0.0, 10.0]`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::scenario::SuspectId;

/// Lower bound of a suspicion score.
pub const SCORE_MIN: f64 = 0.0;
/// Upper bound of a suspicion score.
pub const SCORE_MAX: f64 = 10.0;

/// The suspicion score of every suspect in a session.
///
/// Scores start at `0.0` and can only move through [`SuspicionBoard::apply`],
/// which clamps the result into `[0.0, 10.0]`. The clamp lives here, not in
/// the scoring policies, so policy implementations need not guard range.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SuspicionBoard {
    scores: BTreeMap<SuspectId, f64>,
}

impl SuspicionBoard {
    /// A board with a zero score for each of `ids`.
    pub fn new<I>(ids: I) -> Self
    where
        I: IntoIterator<Item = SuspectId>,
    {
        Self {
            scores: ids.into_iter().map(|id| (id, 0.0)).collect(),
        }
    }

    /// The current score for `id`, if the suspect is on the board.
    pub fn score(&self, id: &SuspectId) -> Option<f64> {
        self.scores.get(id).copied()
    }

    /// Adjust the score for `id` by `delta`, clamped to `[0.0, 10.0]`.
    /// Returns the new score, or `None` if the suspect is unknown.
    pub fn apply(&mut self, id: &SuspectId, delta: f64) -> Option<f64> {
        let entry = self.scores.get_mut(id)?;
        *entry = (*entry + delta).clamp(SCORE_MIN, SCORE_MAX);
        Some(*entry)
    }

    /// All scores, keyed by suspect id.
    pub fn scores(&self) -> &BTreeMap<SuspectId, f64> {
        &self.scores
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> SuspicionBoard {
        SuspicionBoard::new([SuspectId::from("s1"), SuspectId::from("s2")])
    }

    #[test]
    fn starts_at_zero() {
        let b = board();
        assert_eq!(b.score(&SuspectId::from("s1")), Some(0.0));
        assert_eq!(b.score(&SuspectId::from("s2")), Some(0.0));
    }

    #[test]
    fn apply_accumulates() {
        let mut b = board();
        let id = SuspectId::from("s1");
        assert_eq!(b.apply(&id, 0.3), Some(0.3));
        assert_eq!(b.apply(&id, 0.5), Some(0.8));
    }

    #[test]
    fn apply_clamps_high() {
        let mut b = board();
        let id = SuspectId::from("s1");
        for _ in 0..20 {
            b.apply(&id, 0.8);
        }
        assert_eq!(b.score(&id), Some(SCORE_MAX));
    }

    #[test]
    fn apply_clamps_low() {
        let mut b = board();
        let id = SuspectId::from("s1");
        assert_eq!(b.apply(&id, -5.0), Some(SCORE_MIN));
    }

    #[test]
    fn unknown_suspect_untouched() {
        let mut b = board();
        assert_eq!(b.apply(&SuspectId::from("s9"), 0.3), None);
        assert_eq!(b.scores().len(), 2);
    }
}
