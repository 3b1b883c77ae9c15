//! The two capability traits the game core consumes.

use async_trait::async_trait;
use fk_core::RawScenario;

use crate::error::GenerationResult;

/// Produce a free-form text reply given a system context and user message.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate one completion.
    async fn generate(&self, system_context: &str, user_message: &str) -> GenerationResult<String>;
}

/// Produce a structured raw case for the requested number of suspects.
///
/// The output is *raw*: ids and criminal marker are advisory until
/// [`fk_core::Scenario::validate`] has normalized them.
#[async_trait]
pub trait CaseGenerator: Send + Sync {
    /// Generate one case with `requested_suspects` suspects.
    async fn generate_case(&self, requested_suspects: usize) -> GenerationResult<RawScenario>;
}
