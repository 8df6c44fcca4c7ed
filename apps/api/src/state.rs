use sqlx::PgPool;

use crate::llm_client::AiGateway;
use crate::rate_limit::RateLimiter;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Model fallback gateway. Every AI feature goes through it.
    pub llm: AiGateway,
    /// Per-user limit on AI-backed routes, counted in Redis.
    pub rate_limiter: RateLimiter,
}
