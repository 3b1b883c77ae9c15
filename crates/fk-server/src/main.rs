//! Fallakte server — hosts the interrogation game API and frontend.

mod routes;
mod server;

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use fk_engine::{SessionEngine, SessionStore};
use fk_llm::capabilities_from_env;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "fallakte",
    about = "Fallakte — a detective interrogation game server",
    version
)]
struct Cli {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:8000")]
    addr: SocketAddr,

    /// Directory with the frontend assets
    #[arg(long, default_value = "static")]
    static_dir: PathBuf,

    /// Seed for the offline case generator
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let capabilities = capabilities_from_env(cli.seed);
    info!(backend = %capabilities.backend, "generation backend selected");

    let engine = SessionEngine::from_capabilities(&capabilities);
    let state = server::AppState::new(engine, SessionStore::new(), capabilities);

    server::run(state, cli.addr, &cli.static_dir).await
}
