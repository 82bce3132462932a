use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct PartnerApplication {
    pub id: Uuid,
    pub account_id: Option<Uuid>,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub government_id_url: Option<String>,
    pub business_certificate_url: Option<String>,
    pub work_sample_urls: Vec<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
