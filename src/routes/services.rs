use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::extractor::{AuthUser, MaybeAuthUser};
use crate::auth::role::Role;
use crate::db;
use crate::error::AppError;
use crate::models::{Service, ServiceFeedback};
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct ServiceFilter {
    pub category: Option<String>,
    pub city: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateService {
    pub title: String,
    pub category: String,
    pub description: Option<String>,
    pub price: f64,
    pub city: Option<String>,
    #[serde(default)]
    pub image_urls: Vec<String>,
    #[serde(default)]
    pub video_urls: Vec<String>,
}

#[derive(Deserialize)]
pub struct CreateFeedback {
    pub rating: i32,
    pub comment: Option<String>,
}

fn validate_service(title: &str, category: &str, price: f64) -> Result<(), AppError> {
    if title.trim().is_empty() {
        return Err(AppError::Validation("Title is required".to_string()));
    }
    if category.trim().is_empty() {
        return Err(AppError::Validation("Category is required".to_string()));
    }
    if price <= 0.0 || !price.is_finite() {
        return Err(AppError::Validation(
            "Price must be a positive number".to_string(),
        ));
    }
    Ok(())
}

pub async fn create(
    auth: AuthUser,
    State(state): State<SharedState>,
    Json(req): Json<CreateService>,
) -> Result<Json<Service>, AppError> {
    validate_service(&req.title, &req.category, req.price)?;

    let service = db::services::create(
        &state.pool,
        auth.id,
        req.title.trim(),
        &req.category.trim().to_lowercase(),
        req.description.as_deref().filter(|s| !s.is_empty()),
        req.price,
        req.city.as_deref().filter(|s| !s.is_empty()),
        &req.image_urls,
        &req.video_urls,
    )
    .await?;

    Ok(Json(service))
}

pub async fn list(
    State(state): State<SharedState>,
    Query(filter): Query<ServiceFilter>,
) -> Result<Json<Vec<Service>>, AppError> {
    let services = db::services::list(
        &state.pool,
        filter.category.as_deref(),
        filter.city.as_deref(),
    )
    .await?;
    Ok(Json(services))
}

pub async fn list_mine(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<Vec<Service>>, AppError> {
    let services = db::services::list_by_vendor(&state.pool, auth.id).await?;
    Ok(Json(services))
}

/// Public detail view. Authenticated USER viewers get a per-viewer view
/// counter upserted; vendors and admins browsing do not count as views.
pub async fn get(
    MaybeAuthUser(viewer): MaybeAuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let service = db::services::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Service not found".to_string()))?;

    if let Some(viewer) = viewer {
        if viewer.role == Role::User {
            if let Err(e) = db::services::record_view(&state.pool, service.id, viewer.id).await {
                tracing::error!("Failed to record service view: {e}");
            }
        }
    }

    let feedback = db::services::list_feedback(&state.pool, service.id).await?;
    let views = db::services::view_count(&state.pool, service.id).await?;

    Ok(Json(serde_json::json!({
        "service": service,
        "feedback": feedback,
        "views": views,
    })))
}

pub async fn update(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<CreateService>,
) -> Result<Json<Service>, AppError> {
    validate_service(&req.title, &req.category, req.price)?;

    let service = db::services::update(
        &state.pool,
        id,
        auth.id,
        req.title.trim(),
        &req.category.trim().to_lowercase(),
        req.description.as_deref().filter(|s| !s.is_empty()),
        req.price,
        req.city.as_deref().filter(|s| !s.is_empty()),
        &req.image_urls,
        &req.video_urls,
    )
    .await
    .map_err(|e| match e {
        sqlx::Error::RowNotFound => AppError::NotFound("Service not found".to_string()),
        _ => AppError::Database(e),
    })?;

    Ok(Json(service))
}

pub async fn delete(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let removed = db::services::delete(&state.pool, id, auth.id).await?;
    if removed == 0 {
        return Err(AppError::NotFound("Service not found".to_string()));
    }
    Ok(Json(serde_json::json!({ "message": "Service deleted successfully" })))
}

pub async fn add_feedback(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<CreateFeedback>,
) -> Result<Json<ServiceFeedback>, AppError> {
    if !(1..=5).contains(&req.rating) {
        return Err(AppError::Validation(
            "Rating must be between 1 and 5".to_string(),
        ));
    }

    let service = db::services::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Service not found".to_string()))?;

    let feedback = db::services::add_feedback(
        &state.pool,
        service.id,
        auth.id,
        &auth.user_name,
        req.rating,
        req.comment.as_deref().filter(|s| !s.is_empty()),
    )
    .await?;

    Ok(Json(feedback))
}

pub async fn list_feedback(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<ServiceFeedback>>, AppError> {
    let feedback = db::services::list_feedback(&state.pool, id).await?;
    Ok(Json(feedback))
}
