//! Model-driven reply and scoring policies. Both fail open.

use std::sync::Arc;

use async_trait::async_trait;
use fk_core::{Scenario, Suspect};
use fk_llm::{TextGenerator, prompt};
use tracing::warn;

use super::{ReplyPolicy, SuspicionPolicy, fallback_reply};

/// Bounds for a model-produced suspicion delta.
const DELTA_MIN: f64 = -0.5;
const DELTA_MAX: f64 = 0.8;

/// In-character replies from a text generator, with a deterministic
/// fallback so the engine never stalls on provider failure.
pub struct GenerativeReply {
    generator: Arc<dyn TextGenerator>,
}

impl GenerativeReply {
    /// Wrap a text generator.
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }
}

#[async_trait]
impl ReplyPolicy for GenerativeReply {
    async fn reply(&self, suspect: &Suspect, scenario: &Scenario, question: &str) -> String {
        let system = prompt::reply_system(suspect, scenario, scenario.is_criminal(&suspect.id));
        match self.generator.generate(&system, question).await {
            Ok(answer) => answer,
            Err(e) => {
                warn!(suspect = %suspect.id, error = %e, "reply generation failed, using fallback");
                fallback_reply(suspect, question)
            }
        }
    }
}

/// Suspicion scoring through a text generator.
///
/// The scoring prompt asks for a single float; the first signed numeric
/// literal in the reply is taken as the delta and clamped to `[-0.5, 0.8]`.
/// An unparseable reply or a failed call yields `0.0` so the turn still
/// completes.
pub struct GenerativeScore {
    generator: Arc<dyn TextGenerator>,
}

impl GenerativeScore {
    /// Wrap a text generator.
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }
}

#[async_trait]
impl SuspicionPolicy for GenerativeScore {
    async fn score(
        &self,
        scenario_summary: &str,
        suspect: &Suspect,
        last_question: &str,
        last_answer: &str,
        current_score: f64,
    ) -> f64 {
        let user = prompt::score_user(
            last_question,
            last_answer,
            &suspect.bio,
            scenario_summary,
            current_score,
        );
        match self.generator.generate(prompt::SCORE_SYSTEM, &user).await {
            Ok(reply) => match prompt::first_number(&reply) {
                Some(value) => value.clamp(DELTA_MIN, DELTA_MAX),
                None => {
                    warn!(suspect = %suspect.id, "no numeric delta in scoring reply");
                    0.0
                }
            },
            Err(e) => {
                warn!(suspect = %suspect.id, error = %e, "scoring call failed, delta 0.0");
                0.0
            }
        }
    }
}
