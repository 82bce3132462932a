use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct VendorProfile {
    pub id: Uuid,
    pub account_id: Uuid,
    pub business_name: String,
    pub business_category: String,
    pub license_number: Option<String>,
    pub service_types: Vec<String>,
    pub description: Option<String>,
    pub logo_url: Option<String>,
    pub phone_number: String,
    pub country: String,
    pub state: Option<String>,
    pub city: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub facebook_url: Option<String>,
    pub instagram_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
