mod analysis;
mod auth;
mod config;
mod cover_letter;
mod db;
mod envelope;
mod errors;
mod extraction;
mod input;
mod llm_client;
mod models;
mod pagination;
mod rate_limit;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::llm_client::{AiGateway, GeminiClient};
use crate::rate_limit::RateLimiter;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Analyzer API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL (runs pending migrations)
    let db = create_pool(&config.database_url).await?;

    // Initialize Redis-backed rate limiter
    let redis = redis::Client::open(config.redis_url.clone())?;
    let rate_limiter = RateLimiter::new(
        redis,
        config.ai_rate_limit_max,
        config.ai_rate_limit_window_secs,
    );
    info!(
        "Rate limiter initialized ({} requests / {}s)",
        config.ai_rate_limit_max, config.ai_rate_limit_window_secs
    );

    // Initialize AI gateway
    let gemini = GeminiClient::new(config.gemini_api_key.clone())?;
    let llm = AiGateway::new(Arc::new(gemini));
    info!("AI gateway initialized (models: {})", llm.models().join(", "));

    let state = AppState {
        db,
        llm,
        rate_limiter,
    };

    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()), // TODO: restrict allowed origins once the frontend domain is fixed
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
