//! In-memory session store, keyed by fresh session ids.
//!
//! Each session lives behind its own async mutex: concurrent requests
//! against the same id serialize their read-modify-write of the state,
//! while distinct sessions proceed in parallel. Process-lifetime only; no
//! eviction, no persistence.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use fk_core::SessionState;

use crate::error::{EngineError, EngineResult};

/// Unique identifier of a stored session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Generate a fresh random session id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::from_str(s)?))
    }
}

/// A shared handle to one session's state. Lock it for the whole turn.
pub type SessionHandle = Arc<Mutex<SessionState>>;

/// Keyed in-memory persistence for live sessions.
#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<SessionId, SessionHandle>>,
}

impl SessionStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a fresh session and return its id.
    pub async fn create(&self, state: SessionState) -> SessionId {
        let id = SessionId::new();
        self.sessions
            .write()
            .await
            .insert(id, Arc::new(Mutex::new(state)));
        id
    }

    /// Fetch the handle for `id`, or [`EngineError::SessionNotFound`].
    pub async fn get(&self, id: SessionId) -> EngineResult<SessionHandle> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(EngineError::SessionNotFound(id))
    }

    /// Replace the state stored under `id`.
    pub async fn set(&self, id: SessionId, state: SessionState) -> EngineResult<()> {
        let handle = self.get(id).await?;
        *handle.lock().await = state;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fk_core::{RawScenario, RawSuspect, Scenario};

    fn state(summary: &str) -> SessionState {
        let raw = RawScenario {
            summary: summary.to_string(),
            suspects: vec![RawSuspect::default(), RawSuspect::default()],
            ..RawScenario::default()
        };
        SessionState::new(Scenario::validate(raw, 2).unwrap())
    }

    #[tokio::test]
    async fn create_then_get() {
        let store = SessionStore::new();
        let id = store.create(state("case one")).await;

        let handle = store.get(id).await.unwrap();
        assert_eq!(handle.lock().await.scenario.summary, "case one");
    }

    #[tokio::test]
    async fn get_unknown_id_fails() {
        let store = SessionStore::new();
        let err = store.get(SessionId::new()).await.unwrap_err();
        assert!(matches!(err, EngineError::SessionNotFound(_)));
    }

    #[tokio::test]
    async fn set_replaces_state() {
        let store = SessionStore::new();
        let id = store.create(state("before")).await;

        store.set(id, state("after")).await.unwrap();
        let handle = store.get(id).await.unwrap();
        assert_eq!(handle.lock().await.scenario.summary, "after");
    }

    #[tokio::test]
    async fn sessions_are_independent() {
        let store = SessionStore::new();
        let a = store.create(state("a")).await;
        let b = store.create(state("b")).await;
        assert_ne!(a, b);

        let handle_a = store.get(a).await.unwrap();
        handle_a.lock().await.game_over = true;

        let handle_b = store.get(b).await.unwrap();
        assert!(!handle_b.lock().await.game_over);
    }

    #[tokio::test]
    async fn concurrent_turns_on_one_session_serialize() {
        let store = Arc::new(SessionStore::new());
        let id = store.create(state("race")).await;

        let mut tasks = Vec::new();
        for _ in 0..8 {
            let store = store.clone();
            tasks.push(tokio::spawn(async move {
                let handle = store.get(id).await.unwrap();
                let mut guard = handle.lock().await;
                guard.transcript.push(fk_core::Turn::Case {
                    text: "tick".to_string(),
                });
            }));
        }
        for t in tasks {
            t.await.unwrap();
        }

        let handle = store.get(id).await.unwrap();
        assert_eq!(handle.lock().await.transcript.len(), 8);
    }

    #[test]
    fn session_id_round_trips_through_string() {
        let id = SessionId::new();
        let parsed: SessionId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }
}
