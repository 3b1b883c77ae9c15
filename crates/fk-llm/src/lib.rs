//! Generation capability layer for Fallakte.
//!
//! Everything the game needs from a language model is reached through two
//! narrow traits: [`TextGenerator`] (a string reply for a persona and
//! context) and [`CaseGenerator`] (a structured raw case). A configured
//! OpenAI-compatible [`ChatProvider`] implements both over HTTP; the
//! [`LocalGenerator`] implements both deterministically with no network, so
//! a session always works even with zero configuration.

pub mod capability;
pub mod chat;
pub mod error;
pub mod local;
pub mod prompt;
pub mod provider;

pub use capability::{CaseGenerator, TextGenerator};
pub use chat::{ChatConfig, ChatProvider};
pub use error::{GenerationError, GenerationResult};
pub use local::LocalGenerator;
pub use provider::{
    Backend, Capabilities, ProviderSettings, capabilities_from, capabilities_from_env,
};
