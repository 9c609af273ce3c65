mod ai;
mod analysis;
mod config;
mod errors;
mod export;
mod extraction;
mod generation;
mod jobs;
mod matching;
mod pipeline;
mod routes;
mod state;
mod storage;

use anyhow::Result;
use axum::extract::DefaultBodyLimit;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;

/// Room for multipart framing and the text fields sent alongside the file.
const BODY_LIMIT_SLACK: usize = 1024 * 1024;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ATS Optimizer API v{}", env!("CARGO_PKG_VERSION"));

    // Build app state (AI client, scorer, export store)
    let state = AppState::new(config.clone())?;
    match &state.ai {
        Some(ai) => info!("AI features enabled (model: {})", ai.model()),
        None => warn!("PERPLEXITY_API_KEY not set; AI features disabled, using local analysis"),
    }

    state.exports.ensure_dir().await?;
    info!("Export directory: {}", state.exports.root().display());

    // Build router
    let app = build_router(state)
        .layer(DefaultBodyLimit::max(config.max_upload_bytes + BODY_LIMIT_SLACK))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
