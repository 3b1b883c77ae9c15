//! The ask/accuse turn state machine.

use fk_core::{CoreError, GameResult, RawScenario, Scenario, SessionState, SuspectId, Turn};
use fk_llm::{Backend, Capabilities};
use tracing::debug;

use crate::error::EngineResult;
use crate::policy::{
    GenerativeReply, GenerativeScore, HeuristicPolicy, ReplyPolicy, SuspicionPolicy,
};

const REVEAL_WIN: &str = "Correct! You identified the criminal. The case is closed.";
const REVEAL_LOSE: &str = "Incorrect accusation. The real criminal slips away for now.";

/// Drives one game's turn cycle.
///
/// Exactly two transitions exist from a live session: `ask` (question,
/// answer, suspicion update; the session stays live) and `accuse` (one-shot
/// resolution; the session ends regardless of correctness). A finished
/// session rejects both without touching state.
pub struct SessionEngine {
    reply: Box<dyn ReplyPolicy>,
    suspicion: Box<dyn SuspicionPolicy>,
}

impl SessionEngine {
    /// Build an engine from explicit policies.
    pub fn new(reply: Box<dyn ReplyPolicy>, suspicion: Box<dyn SuspicionPolicy>) -> Self {
        Self { reply, suspicion }
    }

    /// Build an engine matching the selected generation backend: generative
    /// scoring when a chat provider is configured, the marker heuristic for
    /// the offline generator (whose echo replies would score nonsense).
    pub fn from_capabilities(caps: &Capabilities) -> Self {
        let reply = Box::new(GenerativeReply::new(caps.text.clone()));
        let suspicion: Box<dyn SuspicionPolicy> = match caps.backend {
            Backend::Offline => Box::new(HeuristicPolicy),
            _ => Box::new(GenerativeScore::new(caps.text.clone())),
        };
        Self::new(reply, suspicion)
    }

    /// Validate a raw case and open a fresh session for it.
    pub fn new_session(&self, raw: RawScenario, requested: usize) -> EngineResult<SessionState> {
        let scenario = Scenario::validate(raw, requested)?;
        Ok(SessionState::new(scenario))
    }

    /// One question turn: record the question, produce the suspect's answer,
    /// and update that suspect's suspicion score. Returns the answer.
    ///
    /// The transcript grows by exactly two turns. Rejections
    /// ([`CoreError::GameOver`], [`CoreError::UnknownSuspect`]) happen
    /// before any mutation.
    pub async fn ask(
        &self,
        state: &mut SessionState,
        target: &SuspectId,
        question: &str,
    ) -> EngineResult<String> {
        if state.game_over {
            return Err(CoreError::GameOver.into());
        }
        let suspect = state
            .scenario
            .suspect(target)
            .cloned()
            .ok_or_else(|| CoreError::UnknownSuspect(target.clone()))?;

        state.transcript.push(Turn::Player {
            target: target.clone(),
            text: question.to_string(),
        });

        let answer = self.reply.reply(&suspect, &state.scenario, question).await;
        state.transcript.push(Turn::Suspect {
            name: suspect.name.clone(),
            text: answer.clone(),
        });
        state.last_answer = Some(answer.clone());

        let current = state.suspicion.score(target).unwrap_or(0.0);
        let delta = self
            .suspicion
            .score(&state.scenario.summary, &suspect, question, &answer, current)
            .await;
        let updated = state.suspicion.apply(target, delta);
        debug!(suspect = %target, delta, score = ?updated, "suspicion updated");

        Ok(answer)
    }

    /// One accusation turn: compare against the criminal, record the reveal,
    /// and end the session. Irreversible whether or not the guess was right.
    ///
    /// The transcript grows by exactly one turn. Rejections happen before
    /// any mutation.
    pub fn accuse(
        &self,
        state: &mut SessionState,
        suspect_id: &SuspectId,
    ) -> EngineResult<GameResult> {
        if state.game_over {
            return Err(CoreError::GameOver.into());
        }
        if state.scenario.suspect(suspect_id).is_none() {
            return Err(CoreError::UnknownSuspect(suspect_id.clone()).into());
        }

        state.accused = Some(suspect_id.clone());
        let result = if state.scenario.is_criminal(suspect_id) {
            GameResult::Win
        } else {
            GameResult::Lose
        };
        let reveal = match result {
            GameResult::Win => REVEAL_WIN,
            GameResult::Lose => REVEAL_LOSE,
        };
        state.transcript.push(Turn::Case {
            text: reveal.to_string(),
        });
        state.result = Some(result);
        state.game_over = true;
        debug!(accused = %suspect_id, ?result, "session resolved");

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::policy::testing::{FixedDelta, ScriptedReply};
    use fk_core::RawSuspect;

    fn raw_case(n: usize) -> RawScenario {
        RawScenario {
            summary: "A necklace vanished during the gala.".to_string(),
            suspects: (0..n)
                .map(|i| RawSuspect {
                    name: format!("Suspect {}", i + 1),
                    alibi: "I was in the kitchen.".to_string(),
                    ..RawSuspect::default()
                })
                .collect(),
            criminal_id: Some("s2".to_string()),
            ..RawScenario::default()
        }
    }

    fn engine(answer: &'static str, delta: f64) -> SessionEngine {
        SessionEngine::new(Box::new(ScriptedReply(answer)), Box::new(FixedDelta(delta)))
    }

    fn id(s: &str) -> SuspectId {
        SuspectId::from(s)
    }

    #[tokio::test]
    async fn ask_grows_transcript_by_two() {
        let e = engine("I saw nothing.", 0.3);
        let mut state = e.new_session(raw_case(4), 4).unwrap();

        let answer = e.ask(&mut state, &id("s1"), "Where were you?").await.unwrap();
        assert_eq!(answer, "I saw nothing.");
        assert_eq!(state.transcript.len(), 2);
        assert_eq!(state.transcript.turns()[0].speaker(), "Player");
        assert_eq!(state.transcript.turns()[1].speaker(), "Suspect 1");
        assert_eq!(state.last_answer.as_deref(), Some("I saw nothing."));
        assert_eq!(state.suspicion.score(&id("s1")), Some(0.3));
    }

    #[tokio::test]
    async fn ask_unknown_suspect_leaves_state_unchanged() {
        let e = engine("x", 0.3);
        let mut state = e.new_session(raw_case(4), 4).unwrap();
        let before = state.clone();

        let err = e.ask(&mut state, &id("s9"), "Well?").await.unwrap_err();
        assert!(matches!(
            err,
            EngineError::Core(CoreError::UnknownSuspect(_))
        ));
        assert_eq!(state, before);
    }

    #[tokio::test]
    async fn scores_stay_bounded_over_many_asks() {
        let e = engine("evasive", 0.8);
        let mut state = e.new_session(raw_case(4), 4).unwrap();

        for _ in 0..30 {
            e.ask(&mut state, &id("s1"), "And then?").await.unwrap();
            let score = state.suspicion.score(&id("s1")).unwrap();
            assert!((0.0..=10.0).contains(&score));
        }
        assert_eq!(state.suspicion.score(&id("s1")), Some(10.0));
    }

    #[tokio::test]
    async fn negative_delta_cannot_go_below_zero() {
        let e = engine("calm", -0.5);
        let mut state = e.new_session(raw_case(4), 4).unwrap();
        e.ask(&mut state, &id("s1"), "Relax.").await.unwrap();
        assert_eq!(state.suspicion.score(&id("s1")), Some(0.0));
    }

    #[tokio::test]
    async fn accuse_criminal_wins() {
        let e = engine("x", 0.0);
        let mut state = e.new_session(raw_case(4), 4).unwrap();

        let result = e.accuse(&mut state, &id("s2")).unwrap();
        assert_eq!(result, GameResult::Win);
        assert!(state.game_over);
        assert_eq!(state.result, Some(GameResult::Win));
        assert_eq!(state.accused, Some(id("s2")));
        assert_eq!(state.transcript.len(), 1);
        assert!(state.transcript.last().unwrap().text().starts_with("Correct!"));
    }

    #[tokio::test]
    async fn accuse_innocent_loses_and_still_ends() {
        let e = engine("x", 0.0);
        let mut state = e.new_session(raw_case(4), 4).unwrap();

        let result = e.accuse(&mut state, &id("s3")).unwrap();
        assert_eq!(result, GameResult::Lose);
        assert!(state.game_over);
        assert!(
            state
                .transcript
                .last()
                .unwrap()
                .text()
                .starts_with("Incorrect")
        );
    }

    #[tokio::test]
    async fn finished_session_is_frozen() {
        let e = engine("x", 0.0);
        let mut state = e.new_session(raw_case(4), 4).unwrap();
        e.accuse(&mut state, &id("s2")).unwrap();
        let frozen = state.clone();

        let err = e.ask(&mut state, &id("s1"), "One more?").await.unwrap_err();
        assert!(matches!(err, EngineError::Core(CoreError::GameOver)));
        assert_eq!(state, frozen);

        let err = e.accuse(&mut state, &id("s1")).unwrap_err();
        assert!(matches!(err, EngineError::Core(CoreError::GameOver)));
        assert_eq!(state, frozen);
    }

    #[tokio::test]
    async fn accuse_unknown_suspect_rejected() {
        let e = engine("x", 0.0);
        let mut state = e.new_session(raw_case(4), 4).unwrap();
        let err = e.accuse(&mut state, &id("nobody")).unwrap_err();
        assert!(matches!(
            err,
            EngineError::Core(CoreError::UnknownSuspect(_))
        ));
        assert!(!state.game_over);
    }

    #[tokio::test]
    async fn new_session_rejects_count_mismatch() {
        let e = engine("x", 0.0);
        let err = e.new_session(raw_case(2), 4).unwrap_err();
        assert!(matches!(
            err,
            EngineError::Core(CoreError::CountMismatch { .. })
        ));
    }

    #[tokio::test]
    async fn full_playthrough_with_heuristic() {
        let e = SessionEngine::new(
            Box::new(ScriptedReply("I don't recall, maybe it was a contradiction")),
            Box::new(HeuristicPolicy),
        );
        let mut state = e.new_session(raw_case(4), 4).unwrap();

        e.ask(&mut state, &id("s2"), "Explain the badge log.").await.unwrap();
        assert_eq!(state.suspicion.score(&id("s2")), Some(0.8));
        assert_eq!(state.suspicion.score(&id("s1")), Some(0.0));

        let result = e.accuse(&mut state, &id("s2")).unwrap();
        assert_eq!(result, GameResult::Win);
        // Question + answer + reveal.
        assert_eq!(state.transcript.len(), 3);
    }
}
