//! Pluggable reply and scoring policies.
//!
//! Policies are infallible from the engine's point of view: a generative
//! policy that cannot reach its provider degrades to the deterministic
//! fallback (reply) or a zero delta (score), so a turn always completes and
//! the transcript never has a gap.

mod generative;
mod heuristic;

use async_trait::async_trait;
use fk_core::{Scenario, Suspect};

pub use generative::{GenerativeReply, GenerativeScore};
pub use heuristic::HeuristicPolicy;

/// Maps one question/answer exchange to a suspicion delta.
///
/// The returned delta is applied by the engine through
/// [`fk_core::SuspicionBoard::apply`], which clamps the running score to
/// `[0.0, 10.0]`; implementations only bound the delta itself.
#[async_trait]
pub trait SuspicionPolicy: Send + Sync {
    /// Score the latest exchange with `suspect`.
    async fn score(
        &self,
        scenario_summary: &str,
        suspect: &Suspect,
        last_question: &str,
        last_answer: &str,
        current_score: f64,
    ) -> f64;
}

/// Produces a suspect's in-character answer to a question.
#[async_trait]
pub trait ReplyPolicy: Send + Sync {
    /// Answer `question` as `suspect`.
    async fn reply(&self, suspect: &Suspect, scenario: &Scenario, question: &str) -> String;
}

/// Deterministic persona-flavored reply used when no generator is reachable.
pub fn fallback_reply(suspect: &Suspect, question: &str) -> String {
    format!(
        "{alibi} That's all I can tell you about '{question}'. \
         I had nothing to do with it.",
        alibi = suspect.alibi,
    )
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Reply policy returning a fixed string.
    pub struct ScriptedReply(pub &'static str);

    #[async_trait]
    impl ReplyPolicy for ScriptedReply {
        async fn reply(&self, _: &Suspect, _: &Scenario, _: &str) -> String {
            self.0.to_string()
        }
    }

    /// Suspicion policy returning a fixed delta.
    pub struct FixedDelta(pub f64);

    #[async_trait]
    impl SuspicionPolicy for FixedDelta {
        async fn score(&self, _: &str, _: &Suspect, _: &str, _: &str, _: f64) -> f64 {
            self.0
        }
    }
}
