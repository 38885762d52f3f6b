mod config;
mod errors;
mod llm_client;
mod planner;
mod routes;
mod state;
mod view;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::planner::advisor::StructuredAiClient;
use crate::planner::session::SessionStore;
use crate::routes::build_router;
use crate::state::AppState;

/// How often idle sessions are swept.
const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(300);

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Career Catalyst API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let ai_timeout = Duration::from_secs(config.ai_timeout_secs);
    let llm = LlmClient::new(config.gemini_api_key.clone(), ai_timeout)?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);
    let advisor = StructuredAiClient::new(Arc::new(llm), ai_timeout);

    info!(
        "Planner options: {} experience levels, {} preparation times",
        config.planner_options.experience_levels.len(),
        config.planner_options.prep_times.len()
    );
    let sessions = SessionStore::new(config.planner_options.clone());
    spawn_session_sweeper(sessions.clone(), config.session_idle_ttl());

    // Build app state
    let state = AppState { sessions, advisor };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict CORS origins once the deployment domain is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Periodically evicts sessions nobody has touched within `max_idle`.
fn spawn_session_sweeper(sessions: SessionStore, max_idle: chrono::Duration) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SESSION_SWEEP_INTERVAL);
        loop {
            interval.tick().await;
            sessions.prune_idle(max_idle);
        }
    });
}
