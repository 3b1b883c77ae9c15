//! Core data model for the Fallakte interrogation game.
//!
//! Provides the case model (scenario, suspects, clues), scenario validation
//! with deterministic suspect ids, the append-only transcript, the bounded
//! suspicion board, and the per-game session state that the engine mutates.

pub mod error;
pub mod scenario;
pub mod session;
pub mod suspicion;
pub mod transcript;

pub use error::{CoreError, CoreResult};
pub use scenario::{CaseDetails, RawScenario, RawSuspect, Scenario, Suspect, SuspectId};
pub use session::{GameResult, SessionState};
pub use suspicion::SuspicionBoard;
pub use transcript::{Transcript, Turn};
