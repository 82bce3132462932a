use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use uuid::Uuid;

use crate::db;
use crate::error::AppError;
use crate::models::InvitationTemplate;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct TemplateFilter {
    pub category: Option<String>,
}

#[derive(Deserialize)]
pub struct UpsertTemplate {
    pub name: String,
    pub category: String,
    pub body: String,
    pub preview_url: Option<String>,
}

fn validate_template(req: &UpsertTemplate) -> Result<(), AppError> {
    if req.name.trim().is_empty() {
        return Err(AppError::Validation("Name is required".to_string()));
    }
    if req.category.trim().is_empty() {
        return Err(AppError::Validation("Category is required".to_string()));
    }
    if req.body.trim().is_empty() {
        return Err(AppError::Validation("Body is required".to_string()));
    }
    Ok(())
}

pub async fn list(
    State(state): State<SharedState>,
    Query(filter): Query<TemplateFilter>,
) -> Result<Json<Vec<InvitationTemplate>>, AppError> {
    let templates = db::invitations::list(&state.pool, filter.category.as_deref()).await?;
    Ok(Json(templates))
}

pub async fn get(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<InvitationTemplate>, AppError> {
    let template = db::invitations::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Template not found".to_string()))?;
    Ok(Json(template))
}

pub async fn create(
    State(state): State<SharedState>,
    Json(req): Json<UpsertTemplate>,
) -> Result<Json<InvitationTemplate>, AppError> {
    validate_template(&req)?;

    let template = db::invitations::create(
        &state.pool,
        req.name.trim(),
        &req.category.trim().to_lowercase(),
        &req.body,
        req.preview_url.as_deref().filter(|s| !s.is_empty()),
    )
    .await?;

    Ok(Json(template))
}

pub async fn update(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpsertTemplate>,
) -> Result<Json<InvitationTemplate>, AppError> {
    validate_template(&req)?;

    let template = db::invitations::update(
        &state.pool,
        id,
        req.name.trim(),
        &req.category.trim().to_lowercase(),
        &req.body,
        req.preview_url.as_deref().filter(|s| !s.is_empty()),
    )
    .await
    .map_err(|e| match e {
        sqlx::Error::RowNotFound => AppError::NotFound("Template not found".to_string()),
        _ => AppError::Database(e),
    })?;

    Ok(Json(template))
}

pub async fn delete(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let removed = db::invitations::delete(&state.pool, id).await?;
    if removed == 0 {
        return Err(AppError::NotFound("Template not found".to_string()));
    }
    Ok(Json(serde_json::json!({ "message": "Template deleted successfully" })))
}
