//! Axum route handlers for the Cover Letter API.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::cover_letter::generator::generate_cover_letter;
use crate::cover_letter::store::{
    delete_cover_letter, insert_cover_letter, list_cover_letters, NewCoverLetter,
};
use crate::envelope::ApiResponse;
use crate::errors::AppError;
use crate::input::{optional_job_description, require_resume_text};
use crate::models::cover_letter::CoverLetterRow;
use crate::pagination::{PageQuery, Paginated};
use crate::state::AppState;

pub const GENERATION_SUCCESS: &str = "Cover letter generated successfully";
pub const DELETE_SUCCESS: &str = "Cover letter deleted successfully";
pub const COVER_LETTER_NOT_FOUND: &str = "Cover letter not found";

const DEFAULT_HISTORY_LIMIT: i64 = 10;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateCoverLetterRequest {
    pub resume_text: String,
    #[serde(default)]
    pub job_description: Option<String>,
}

/// POST /api/cover-letter/generate
///
/// The letter is persisted only after generation succeeds.
pub async fn handle_generate(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<GenerateCoverLetterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CoverLetterRow>>), AppError> {
    let resume_text = require_resume_text(&request.resume_text)?;
    let job_description = optional_job_description(request.job_description.as_deref())?;

    state.rate_limiter.check(user.id()).await?;

    let cover_letter = generate_cover_letter(&state.llm, resume_text, job_description).await?;

    let row = insert_cover_letter(
        &state.db,
        NewCoverLetter {
            user_id: user.id(),
            resume_text,
            job_description,
            cover_letter: &cover_letter,
        },
    )
    .await?;

    Ok(ApiResponse::created(GENERATION_SUCCESS, row))
}

/// GET /api/cover-letter/history?page=&limit=
pub async fn handle_history(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<PageQuery>,
) -> Result<Json<Paginated<CoverLetterRow>>, AppError> {
    state.rate_limiter.check(user.id()).await?;

    let page = query.resolve(DEFAULT_HISTORY_LIMIT);
    let (rows, total) = list_cover_letters(&state.db, user.id(), page).await?;

    Ok(Json(Paginated::new(rows, page, total)))
}

/// DELETE /api/cover-letter/history/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    state.rate_limiter.check(user.id()).await?;

    let deleted = match Uuid::parse_str(&id) {
        Ok(id) => delete_cover_letter(&state.db, user.id(), id).await?,
        Err(_) => false,
    };
    if !deleted {
        return Err(AppError::NotFound(COVER_LETTER_NOT_FOUND.to_string()));
    }

    Ok(Json(ApiResponse::message(DELETE_SUCCESS)))
}
