use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CoverLetterRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub resume_text: String,
    /// Empty when the letter was generated without a job description.
    pub job_description: String,
    pub cover_letter: String,
    pub created_at: DateTime<Utc>,
}
