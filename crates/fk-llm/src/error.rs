//! Error types for generation providers.

use thiserror::Error;

/// Alias for `Result<T, GenerationError>`.
pub type GenerationResult<T> = Result<T, GenerationError>;

/// Errors raised by a generation capability.
///
/// During a turn these are recovered locally (deterministic reply fallback,
/// zero score delta); only case generation is allowed to abort an operation.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The HTTP request to the provider failed (connect, timeout, decode).
    #[error("provider request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("provider returned status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, truncated by the caller.
        body: String,
    },

    /// The provider answered but the completion was empty.
    #[error("provider returned an empty completion")]
    EmptyCompletion,

    /// The generated case did not parse or validate.
    #[error(transparent)]
    Case(#[from] fk_core::CoreError),
}
