use sqlx::types::Json;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::analysis::result::AnalysisResult;
use crate::models::analysis::AnalysisRow;
use crate::pagination::Page;

pub struct NewAnalysis<'a> {
    pub user_id: Uuid,
    pub resume_text: &'a str,
    pub job_description: Option<&'a str>,
    pub result: &'a AnalysisResult,
}

/// Records are written once and never updated.
pub async fn insert_analysis(
    pool: &PgPool,
    analysis: NewAnalysis<'_>,
) -> Result<AnalysisRow, sqlx::Error> {
    let row = sqlx::query_as::<_, AnalysisRow>(
        r#"
        INSERT INTO resume_analyses (id, user_id, resume_text, job_description, result)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(analysis.user_id)
    .bind(analysis.resume_text)
    .bind(analysis.job_description)
    .bind(Json(analysis.result))
    .fetch_one(pool)
    .await?;

    info!("Stored resume analysis {} for user {}", row.id, row.user_id);
    Ok(row)
}

/// Newest-first page of a user's analyses plus their total count.
pub async fn list_analyses(
    pool: &PgPool,
    user_id: Uuid,
    page: Page,
) -> Result<(Vec<AnalysisRow>, i64), sqlx::Error> {
    let rows = sqlx::query_as::<_, AnalysisRow>(
        "SELECT * FROM resume_analyses WHERE user_id = $1 ORDER BY created_at DESC LIMIT $2 OFFSET $3",
    )
    .bind(user_id)
    .bind(page.limit)
    .bind(page.offset())
    .fetch_all(pool);

    let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM resume_analyses WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(pool);

    tokio::try_join!(rows, total)
}

/// Every analysis for a user, oldest first.
pub async fn all_analyses_chronological(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<AnalysisRow>, sqlx::Error> {
    sqlx::query_as::<_, AnalysisRow>(
        "SELECT * FROM resume_analyses WHERE user_id = $1 ORDER BY created_at ASC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// Deletes only when the record belongs to `user_id`. Returns whether a row was removed.
pub async fn delete_analysis(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM resume_analyses WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
