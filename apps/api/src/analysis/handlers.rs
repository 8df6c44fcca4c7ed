//! Axum route handlers for the Resume API.

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::ai::chat_about_resume;
use crate::analysis::analytics::{build_report, AnalyticsReport};
use crate::analysis::pipeline::analyze_and_store;
use crate::analysis::store::{all_analyses_chronological, delete_analysis, list_analyses};
use crate::auth::AuthUser;
use crate::envelope::ApiResponse;
use crate::errors::{AppError, FILE_TOO_LARGE};
use crate::extraction::extract_text_from_pdf;
use crate::input::{optional_job_description, require_question, require_resume_text};
use crate::models::analysis::AnalysisRow;
use crate::pagination::{PageQuery, Paginated};
use crate::state::AppState;

pub const ANALYZE_SUCCESS: &str = "Resume analyzed successfully";
pub const DELETE_SUCCESS: &str = "Analysis deleted successfully";
pub const ANALYSIS_NOT_FOUND: &str = "Analysis not found";
pub const INVALID_FILE_TYPE: &str = "Invalid file type. Only PDF files are allowed.";
pub const NO_FILE_UPLOADED: &str = "No file uploaded.";

pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;
const DEFAULT_HISTORY_LIMIT: i64 = 6;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub resume_text: String,
    #[serde(default)]
    pub job_description: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub resume_text: String,
    pub question: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub answer: String,
}

type Created<T> = (StatusCode, Json<ApiResponse<T>>);

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/resume/analyze
pub async fn handle_analyze(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Created<AnalysisRow>, AppError> {
    let resume_text = require_resume_text(&request.resume_text)?;
    let job_description = optional_job_description(request.job_description.as_deref())?;

    state.rate_limiter.check(user.id()).await?;

    let row = analyze_and_store(&state.db, &state.llm, user.id(), resume_text, job_description).await?;

    Ok(ApiResponse::created(ANALYZE_SUCCESS, row))
}

/// POST /api/resume/analyze/upload
///
/// Multipart body: `file` (application/pdf, at most 5 MB) and an optional
/// `jobDescription` text field. Other fields are ignored.
pub async fn handle_analyze_upload(
    State(state): State<AppState>,
    user: AuthUser,
    multipart: Multipart,
) -> Result<Created<AnalysisRow>, AppError> {
    state.rate_limiter.check(user.id()).await?;

    let upload = read_upload(multipart, MAX_UPLOAD_BYTES).await?;
    let resume_text = extract_text_from_pdf(upload.pdf).await?;

    let row = analyze_and_store(
        &state.db,
        &state.llm,
        user.id(),
        &resume_text,
        upload.job_description.as_deref(),
    )
    .await?;

    Ok(ApiResponse::created(ANALYZE_SUCCESS, row))
}

/// A validated resume upload, before text extraction.
#[derive(Debug)]
pub struct ResumeUpload {
    pub pdf: Vec<u8>,
    pub job_description: Option<String>,
}

/// Reads the `file` and `jobDescription` fields and applies the upload rules.
pub async fn read_upload(
    mut multipart: Multipart,
    max_bytes: usize,
) -> Result<ResumeUpload, AppError> {
    let mut pdf: Option<Vec<u8>> = None;
    let mut job_description: Option<String> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                if field.content_type() != Some("application/pdf") {
                    return Err(AppError::Validation(INVALID_FILE_TYPE.to_string()));
                }
                let bytes = field.bytes().await?;
                if bytes.len() > max_bytes {
                    return Err(AppError::PayloadTooLarge(FILE_TOO_LARGE.to_string()));
                }
                pdf = Some(bytes.to_vec());
            }
            "jobDescription" => job_description = Some(field.text().await?),
            _ => {}
        }
    }

    let pdf = pdf.ok_or_else(|| AppError::Validation(NO_FILE_UPLOADED.to_string()))?;
    let job_description = optional_job_description(job_description.as_deref())?.map(str::to_string);

    Ok(ResumeUpload {
        pdf,
        job_description,
    })
}

/// GET /api/resume/history?page=&limit=
pub async fn handle_history(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<PageQuery>,
) -> Result<Json<Paginated<AnalysisRow>>, AppError> {
    state.rate_limiter.check(user.id()).await?;

    let page = query.resolve(DEFAULT_HISTORY_LIMIT);
    let (rows, total) = list_analyses(&state.db, user.id(), page).await?;

    Ok(Json(Paginated::new(rows, page, total)))
}

/// DELETE /api/resume/history/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    state.rate_limiter.check(user.id()).await?;

    // Malformed ids cannot match a record, so they are reported as missing.
    let deleted = match Uuid::parse_str(&id) {
        Ok(id) => delete_analysis(&state.db, user.id(), id).await?,
        Err(_) => false,
    };
    if !deleted {
        return Err(AppError::NotFound(ANALYSIS_NOT_FOUND.to_string()));
    }

    Ok(Json(ApiResponse::message(DELETE_SUCCESS)))
}

/// GET /api/resume/analytics
pub async fn handle_analytics(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<ApiResponse<AnalyticsReport>>, AppError> {
    state.rate_limiter.check(user.id()).await?;

    let records = all_analyses_chronological(&state.db, user.id()).await?;

    Ok(Json(ApiResponse::data(build_report(&records))))
}

/// POST /api/resume/chat
///
/// Free-text question about a resume. Nothing is persisted.
pub async fn handle_chat(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ApiResponse<ChatResponse>>, AppError> {
    let resume_text = require_resume_text(&request.resume_text)?;
    let question = require_question(&request.question)?;

    state.rate_limiter.check(user.id()).await?;

    let answer = chat_about_resume(&state.llm, resume_text, question).await?;

    Ok(Json(ApiResponse::data(ChatResponse { answer })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::extract::FromRequest;
    use axum::http::{header::CONTENT_TYPE, Request};

    const BOUNDARY: &str = "resume-upload-boundary";

    /// (field name, content type for file parts, body)
    fn multipart(parts: &[(&str, Option<&str>, &str)]) -> Request<Body> {
        let mut body = Vec::new();
        for (name, content_type, data) in parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            match content_type {
                Some(ct) => body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"resume\"\r\n\
                         Content-Type: {ct}\r\n\r\n"
                    )
                    .as_bytes(),
                ),
                None => body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                ),
            }
            body.extend_from_slice(data.as_bytes());
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri("/api/resume/analyze/upload")
            .header(CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}"))
            .body(Body::from(body))
            .unwrap()
    }

    async fn upload(
        parts: &[(&str, Option<&str>, &str)],
        max_bytes: usize,
    ) -> Result<ResumeUpload, AppError> {
        let multipart = Multipart::from_request(multipart(parts), &()).await.unwrap();
        read_upload(multipart, max_bytes).await
    }

    #[tokio::test]
    async fn test_upload_reads_pdf_and_job_description() {
        let jd = "Senior backend engineer building Rust services on AWS with Postgres.";
        let upload = upload(
            &[
                ("file", Some("application/pdf"), "%PDF-1.4 bytes"),
                ("jobDescription", None, jd),
                ("ignored", None, "x"),
            ],
            MAX_UPLOAD_BYTES,
        )
        .await
        .unwrap();

        assert_eq!(upload.pdf, b"%PDF-1.4 bytes");
        assert_eq!(upload.job_description.as_deref(), Some(jd));
    }

    #[tokio::test]
    async fn test_upload_rejects_non_pdf() {
        let err = upload(&[("file", Some("image/png"), "png")], MAX_UPLOAD_BYTES)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m == INVALID_FILE_TYPE));
    }

    #[tokio::test]
    async fn test_upload_rejects_oversized_file() {
        let err = upload(&[("file", Some("application/pdf"), "x".repeat(32).as_str())], 16)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::PayloadTooLarge(ref m) if m == FILE_TOO_LARGE));
    }

    #[tokio::test]
    async fn test_upload_without_file_is_rejected() {
        let err = upload(&[("jobDescription", None, "")], MAX_UPLOAD_BYTES)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m == NO_FILE_UPLOADED));
    }

    #[tokio::test]
    async fn test_upload_validates_job_description() {
        let short = upload(
            &[
                ("file", Some("application/pdf"), "%PDF"),
                ("jobDescription", None, "Rust dev"),
            ],
            MAX_UPLOAD_BYTES,
        )
        .await
        .unwrap_err();
        assert!(matches!(short, AppError::Validation(_)));

        let blank = upload(
            &[
                ("file", Some("application/pdf"), "%PDF"),
                ("jobDescription", None, "   "),
            ],
            MAX_UPLOAD_BYTES,
        )
        .await
        .unwrap();
        assert!(blank.job_description.is_none());
    }

    #[test]
    fn test_analyze_request_is_camel_case() {
        let request: AnalyzeRequest = serde_json::from_str(
            r#"{"resumeText": "text", "jobDescription": "role"}"#,
        )
        .unwrap();
        assert_eq!(request.resume_text, "text");
        assert_eq!(request.job_description.as_deref(), Some("role"));
    }

    #[test]
    fn test_job_description_may_be_omitted_or_null() {
        let omitted: AnalyzeRequest = serde_json::from_str(r#"{"resumeText": "t"}"#).unwrap();
        let null: AnalyzeRequest =
            serde_json::from_str(r#"{"resumeText": "t", "jobDescription": null}"#).unwrap();
        assert!(omitted.job_description.is_none());
        assert!(null.job_description.is_none());
    }

    #[test]
    fn test_chat_request_requires_question() {
        assert!(serde_json::from_str::<ChatRequest>(r#"{"resumeText": "t"}"#).is_err());
    }
}
