use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::cover_letter::CoverLetterRow;
use crate::pagination::Page;

pub struct NewCoverLetter<'a> {
    pub user_id: Uuid,
    pub resume_text: &'a str,
    pub job_description: Option<&'a str>,
    pub cover_letter: &'a str,
}

/// A missing job description is stored as an empty string.
pub async fn insert_cover_letter(
    pool: &PgPool,
    letter: NewCoverLetter<'_>,
) -> Result<CoverLetterRow, sqlx::Error> {
    let row = sqlx::query_as::<_, CoverLetterRow>(
        r#"
        INSERT INTO cover_letters (id, user_id, resume_text, job_description, cover_letter)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(letter.user_id)
    .bind(letter.resume_text)
    .bind(letter.job_description.unwrap_or(""))
    .bind(letter.cover_letter)
    .fetch_one(pool)
    .await?;

    info!("Stored cover letter {} for user {}", row.id, row.user_id);
    Ok(row)
}

pub async fn list_cover_letters(
    pool: &PgPool,
    user_id: Uuid,
    page: Page,
) -> Result<(Vec<CoverLetterRow>, i64), sqlx::Error> {
    let rows = sqlx::query_as::<_, CoverLetterRow>(
        "SELECT * FROM cover_letters WHERE user_id = $1 ORDER BY created_at DESC LIMIT $2 OFFSET $3",
    )
    .bind(user_id)
    .bind(page.limit)
    .bind(page.offset())
    .fetch_all(pool);

    let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM cover_letters WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(pool);

    tokio::try_join!(rows, total)
}

pub async fn delete_cover_letter(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM cover_letters WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
