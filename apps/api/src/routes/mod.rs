pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};

use crate::analysis::handlers::{self as resume, MAX_UPLOAD_BYTES};
use crate::cover_letter::handlers as cover_letter;
use crate::errors::AppError;
use crate::state::AppState;

pub const ROUTE_NOT_FOUND: &str = "Route not found";

/// Multipart framing and the optional text fields ride on top of the file itself.
const UPLOAD_BODY_LIMIT: usize = MAX_UPLOAD_BYTES + 64 * 1024;

async fn route_not_found() -> AppError {
    AppError::NotFound(ROUTE_NOT_FOUND.to_string())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Resume API
        .route("/api/resume/analyze", post(resume::handle_analyze))
        .route(
            "/api/resume/analyze/upload",
            post(resume::handle_analyze_upload).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route("/api/resume/history", get(resume::handle_history))
        .route("/api/resume/history/:id", delete(resume::handle_delete))
        .route("/api/resume/analytics", get(resume::handle_analytics))
        .route("/api/resume/chat", post(resume::handle_chat))
        // Cover Letter API
        .route(
            "/api/cover-letter/generate",
            post(cover_letter::handle_generate),
        )
        .route(
            "/api/cover-letter/history",
            get(cover_letter::handle_history),
        )
        .route(
            "/api/cover-letter/history/:id",
            delete(cover_letter::handle_delete),
        )
        .fallback(route_not_found)
        .with_state(state)
}
