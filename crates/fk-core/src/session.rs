//! Per-game session state.

use serde::{Deserialize, Serialize};

use crate::scenario::{Scenario, SuspectId};
use crate::suspicion::SuspicionBoard;
use crate::transcript::Transcript;

/// Outcome of an accusation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameResult {
    /// The player accused the criminal.
    Win,
    /// The player accused an innocent suspect.
    Lose,
}

/// The full state of one game, owned by the store and mutated in place by
/// the engine on every turn.
///
/// Once `game_over` is set the state is frozen: the engine rejects all
/// further turns without touching it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    /// The validated case being played.
    pub scenario: Scenario,
    /// Per-suspect suspicion scores.
    pub suspicion: SuspicionBoard,
    /// Everything said so far.
    pub transcript: Transcript,
    /// The most recent suspect answer, if any.
    pub last_answer: Option<String>,
    /// The accused suspect once an accusation has been made.
    pub accused: Option<SuspectId>,
    /// Whether the session has reached its terminal state.
    pub game_over: bool,
    /// Win/lose, set together with `game_over`.
    pub result: Option<GameResult>,
}

impl SessionState {
    /// Fresh state for a validated scenario: zeroed board, empty transcript.
    pub fn new(scenario: Scenario) -> Self {
        let suspicion = SuspicionBoard::new(scenario.suspects.iter().map(|s| s.id.clone()));
        Self {
            scenario,
            suspicion,
            transcript: Transcript::new(),
            last_answer: None,
            accused: None,
            game_over: false,
            result: None,
        }
    }
}
