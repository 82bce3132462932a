use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Service {
    pub id: Uuid,
    pub vendor_id: Uuid,
    pub title: String,
    pub category: String,
    pub description: Option<String>,
    pub price: f64,
    pub city: Option<String>,
    pub image_urls: Vec<String>,
    pub video_urls: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct ServiceFeedback {
    pub id: Uuid,
    pub service_id: Uuid,
    pub account_id: Uuid,
    pub user_name: String,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}
