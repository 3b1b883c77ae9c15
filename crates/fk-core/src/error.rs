//! Error types for the core game model.

use thiserror::Error;

use crate::scenario::SuspectId;

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur while validating a case or driving a session.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A generated case did not match the expected structure.
    #[error("malformed case: {0}")]
    Schema(String),

    /// The generator supplied the wrong number of suspects.
    #[error("expected {expected} suspects, generator supplied {found}")]
    CountMismatch {
        /// The number of suspects requested.
        expected: usize,
        /// The number of suspects actually supplied.
        found: usize,
    },

    /// The targeted or accused suspect id is not part of the case.
    #[error("unknown suspect: {0}")]
    UnknownSuspect(SuspectId),

    /// The session has already ended; no further turns are accepted.
    #[error("game is over")]
    GameOver,
}
