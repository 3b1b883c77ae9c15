//! Error types for the session engine and store.

use thiserror::Error;

use crate::store::SessionId;

/// Alias for `Result<T, EngineError>`.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors surfaced by engine operations and the session store.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A core model error: bad suspect id, finished game, malformed case.
    #[error(transparent)]
    Core(#[from] fk_core::CoreError),

    /// Case generation failed; fatal to game creation only.
    #[error(transparent)]
    Generation(#[from] fk_llm::GenerationError),

    /// No session is stored under the given id.
    #[error("session not found: {0}")]
    SessionNotFound(SessionId),
}
