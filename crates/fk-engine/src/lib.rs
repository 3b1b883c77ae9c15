//! Session engine for the Fallakte interrogation game.
//!
//! [`SessionEngine`] drives the two-path turn cycle: a question produces an
//! in-character answer and a bounded suspicion update, an accusation
//! resolves the game irreversibly. Replies and scoring are pluggable
//! policies; [`SessionStore`] keeps live sessions behind per-session locks.

pub mod engine;
pub mod error;
pub mod policy;
pub mod store;

pub use engine::SessionEngine;
pub use error::{EngineError, EngineResult};
pub use policy::{
    GenerativeReply, GenerativeScore, HeuristicPolicy, ReplyPolicy, SuspicionPolicy,
    fallback_reply,
};
pub use store::{SessionId, SessionStore};
