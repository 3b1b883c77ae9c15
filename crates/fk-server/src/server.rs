//! HTTP server wiring: shared state, router, and the serve loop.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use axum::routing::post;
use fk_engine::{SessionEngine, SessionStore};
use fk_llm::Capabilities;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::routes;

/// Application state shared across handlers.
pub struct AppState {
    /// The turn state machine.
    pub engine: SessionEngine,
    /// Live sessions.
    pub store: SessionStore,
    /// The selected generation backend.
    pub capabilities: Capabilities,
}

impl AppState {
    /// Bundle the engine, store, and capabilities.
    pub fn new(engine: SessionEngine, store: SessionStore, capabilities: Capabilities) -> Self {
        Self {
            engine,
            store,
            capabilities,
        }
    }
}

/// Build the application router. Static assets are served from
/// `static_dir`, with `/` falling through to its `index.html`.
pub fn app(state: Arc<AppState>, static_dir: &Path) -> Router {
    Router::new()
        .route("/api/new_game", post(routes::new_game))
        .route("/api/ask", post(routes::ask))
        .route("/api/accuse", post(routes::accuse))
        .fallback_service(ServeDir::new(static_dir).append_index_html_on_directories(true))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Bind and serve until the process is stopped.
pub async fn run(state: AppState, addr: SocketAddr, static_dir: &Path) -> Result<()> {
    let app = app(Arc::new(state), static_dir);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on http://{addr}");

    axum::serve(listener, app).await?;
    Ok(())
}
