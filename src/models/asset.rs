use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct EditorAsset {
    pub id: Uuid,
    pub account_id: Uuid,
    pub url: String,
    pub created_at: DateTime<Utc>,
}
