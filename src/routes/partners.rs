use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::extractor::MaybeAuthUser;
use crate::db;
use crate::error::AppError;
use crate::models::PartnerApplication;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct PartnerFilter {
    pub status: Option<String>,
}

#[derive(Deserialize)]
pub struct CreatePartner {
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub government_id_url: Option<String>,
    pub business_certificate_url: Option<String>,
    #[serde(default)]
    pub work_sample_urls: Vec<String>,
}

#[derive(Deserialize)]
pub struct UpdateStatus {
    pub status: String,
}

/// Open to anonymous callers; an authenticated submitter gets linked to
/// their account.
pub async fn create(
    MaybeAuthUser(submitter): MaybeAuthUser,
    State(state): State<SharedState>,
    Json(req): Json<CreatePartner>,
) -> Result<Json<PartnerApplication>, AppError> {
    if req.name.trim().is_empty() {
        return Err(AppError::Validation("Name is required".to_string()));
    }
    let email = req.email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::Validation("Invalid email address".to_string()));
    }
    if req.phone_number.len() < 10 || !req.phone_number.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::Validation(
            "Phone number must be at least 10 digits".to_string(),
        ));
    }
    if req.work_sample_urls.len() > 5 {
        return Err(AppError::Validation(
            "At most 5 work samples are allowed".to_string(),
        ));
    }

    let application = db::partners::create(
        &state.pool,
        submitter.map(|s| s.id),
        req.name.trim(),
        &email,
        &req.phone_number,
        req.government_id_url.as_deref().filter(|s| !s.is_empty()),
        req.business_certificate_url
            .as_deref()
            .filter(|s| !s.is_empty()),
        &req.work_sample_urls,
    )
    .await?;

    Ok(Json(application))
}

pub async fn list(
    State(state): State<SharedState>,
    Query(filter): Query<PartnerFilter>,
) -> Result<Json<Vec<PartnerApplication>>, AppError> {
    let applications = db::partners::list(&state.pool, filter.status.as_deref()).await?;
    Ok(Json(applications))
}

pub async fn get(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PartnerApplication>, AppError> {
    let application = db::partners::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Partner application not found".to_string()))?;
    Ok(Json(application))
}

pub async fn update_status(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateStatus>,
) -> Result<Json<PartnerApplication>, AppError> {
    let status = req.status.to_lowercase();
    if !["pending", "approved", "rejected"].contains(&status.as_str()) {
        return Err(AppError::Validation(format!("Invalid status: {status}")));
    }

    let application = db::partners::update_status(&state.pool, id, &status)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => {
                AppError::NotFound("Partner application not found".to_string())
            }
            _ => AppError::Database(e),
        })?;

    Ok(Json(application))
}
