//! API routes for the interrogation game.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use fk_core::{CaseDetails, CoreError, GameResult, SuspectId, Turn};
use fk_engine::{EngineError, SessionId};
use fk_llm::CaseGenerator;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::server::AppState;

const DEFAULT_SUSPECTS: usize = 4;
const MIN_SUSPECTS: usize = 2;
const MAX_SUSPECTS: usize = 8;

/// Request body for `POST /api/new_game`.
#[derive(Debug, Deserialize)]
pub struct NewGameRequest {
    /// Number of suspects to generate; defaults to 4, clamped to 2..=8.
    #[serde(default)]
    pub num_suspects: Option<usize>,
}

/// What the player is allowed to see about a suspect: no bio, no alibi,
/// and certainly no role.
#[derive(Debug, Serialize)]
pub struct PublicSuspect {
    /// Canonical suspect id.
    pub id: SuspectId,
    /// Display name.
    pub name: String,
    /// Occupation.
    pub occupation: String,
}

/// Response body for `POST /api/new_game`.
#[derive(Debug, Serialize)]
pub struct NewGameResponse {
    /// Session id for subsequent calls.
    pub game_id: SessionId,
    /// Case summary.
    pub summary: String,
    /// Crime details.
    pub details: CaseDetails,
    /// Public suspect views.
    pub suspects: Vec<PublicSuspect>,
    /// Zeroed suspicion map.
    pub suspicion: BTreeMap<SuspectId, f64>,
}

/// Request body for `POST /api/ask`.
#[derive(Debug, Deserialize)]
pub struct AskRequest {
    /// Session id from `new_game`.
    pub game_id: String,
    /// The suspect to question.
    pub suspect_id: String,
    /// The question.
    pub question: String,
}

/// Response body for `POST /api/ask`.
#[derive(Debug, Serialize)]
pub struct AskResponse {
    /// The suspect's answer.
    pub answer: String,
    /// Updated suspicion map.
    pub suspicion: BTreeMap<SuspectId, f64>,
    /// Whether the session has ended.
    pub game_over: bool,
    /// Win/lose once the session has ended.
    pub result: Option<GameResult>,
    /// The full transcript so far.
    pub messages: Vec<Turn>,
}

/// Request body for `POST /api/accuse`.
#[derive(Debug, Deserialize)]
pub struct AccuseRequest {
    /// Session id from `new_game`.
    pub game_id: String,
    /// The accused suspect.
    pub suspect_id: String,
}

/// Response body for `POST /api/accuse`.
#[derive(Debug, Serialize)]
pub struct AccuseResponse {
    /// Always true after an accusation.
    pub game_over: bool,
    /// Win or lose.
    pub result: Option<GameResult>,
    /// The full transcript including the reveal.
    pub messages: Vec<Turn>,
}

/// Errors mapped onto HTTP statuses.
#[derive(Debug)]
pub enum ApiError {
    /// The game id is unknown or unparseable.
    GameNotFound,
    /// Anything the engine rejected or failed on.
    Engine(EngineError),
}

impl From<EngineError> for ApiError {
    fn from(e: EngineError) -> Self {
        match e {
            EngineError::SessionNotFound(_) => Self::GameNotFound,
            other => Self::Engine(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::GameNotFound => (StatusCode::NOT_FOUND, "Game not found".to_string()),
            Self::Engine(EngineError::Core(CoreError::GameOver)) => {
                (StatusCode::BAD_REQUEST, "Game is over".to_string())
            }
            Self::Engine(EngineError::Core(CoreError::UnknownSuspect(id))) => {
                (StatusCode::BAD_REQUEST, format!("Unknown suspect: {id}"))
            }
            // Malformed or failed generation is an upstream fault.
            Self::Engine(e) => (StatusCode::BAD_GATEWAY, e.to_string()),
        };
        (status, Json(json!({ "detail": message }))).into_response()
    }
}

/// Create a new game and return the public scenario view.
pub async fn new_game(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewGameRequest>,
) -> Result<Json<NewGameResponse>, ApiError> {
    let requested = req
        .num_suspects
        .unwrap_or(DEFAULT_SUSPECTS)
        .clamp(MIN_SUSPECTS, MAX_SUSPECTS);

    let raw = state
        .capabilities
        .cases
        .generate_case(requested)
        .await
        .map_err(EngineError::from)?;
    let session = state.engine.new_session(raw, requested)?;

    let summary = session.scenario.summary.clone();
    let details = session.scenario.details.clone();
    let suspects = session
        .scenario
        .suspects
        .iter()
        .map(|s| PublicSuspect {
            id: s.id.clone(),
            name: s.name.clone(),
            occupation: s.occupation.clone(),
        })
        .collect();
    let suspicion = session.suspicion.scores().clone();

    let game_id = state.store.create(session).await;
    info!(%game_id, suspects = requested, "new game created");

    Ok(Json(NewGameResponse {
        game_id,
        summary,
        details,
        suspects,
        suspicion,
    }))
}

/// Question one suspect and return the answer with updated suspicion.
pub async fn ask(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AskRequest>,
) -> Result<Json<AskResponse>, ApiError> {
    let id: SessionId = req.game_id.parse().map_err(|_| ApiError::GameNotFound)?;
    let handle = state.store.get(id).await?;

    // Held for the whole turn: concurrent calls on this game serialize here.
    let mut session = handle.lock().await;

    let target = SuspectId::from(req.suspect_id.as_str());
    let answer = state.engine.ask(&mut session, &target, &req.question).await?;

    Ok(Json(AskResponse {
        answer,
        suspicion: session.suspicion.scores().clone(),
        game_over: session.game_over,
        result: session.result,
        messages: session.transcript.turns().to_vec(),
    }))
}

/// Accuse one suspect, ending the game.
pub async fn accuse(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AccuseRequest>,
) -> Result<Json<AccuseResponse>, ApiError> {
    let id: SessionId = req.game_id.parse().map_err(|_| ApiError::GameNotFound)?;
    let handle = state.store.get(id).await?;

    let mut session = handle.lock().await;

    let accused = SuspectId::from(req.suspect_id.as_str());
    let result = state.engine.accuse(&mut session, &accused)?;
    info!(%id, accused = %accused, ?result, "game resolved");

    Ok(Json(AccuseResponse {
        game_over: session.game_over,
        result: session.result,
        messages: session.transcript.turns().to_vec(),
    }))
}
