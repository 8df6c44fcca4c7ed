use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// One persisted resume analysis. `result` holds the merged `AnalysisResult`
/// JSON and is never updated after insert.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub resume_text: String,
    pub job_description: Option<String>,
    pub result: Value,
    pub created_at: DateTime<Utc>,
}
