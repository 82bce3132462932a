use axum::Json;
use axum::extract::{Path, State};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::models::EditorAsset;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct SaveAssets {
    pub urls: Vec<String>,
}

pub async fn save(
    auth: AuthUser,
    State(state): State<SharedState>,
    Json(req): Json<SaveAssets>,
) -> Result<Json<Vec<EditorAsset>>, AppError> {
    if req.urls.is_empty() {
        return Err(AppError::Validation(
            "At least one URL is required".to_string(),
        ));
    }
    if req.urls.iter().any(|u| u.trim().is_empty()) {
        return Err(AppError::Validation("URLs must not be empty".to_string()));
    }

    let mut saved = Vec::with_capacity(req.urls.len());
    for url in &req.urls {
        saved.push(db::assets::create(&state.pool, auth.id, url.trim()).await?);
    }

    Ok(Json(saved))
}

pub async fn list(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<Vec<EditorAsset>>, AppError> {
    let assets = db::assets::list_by_account(&state.pool, auth.id).await?;
    Ok(Json(assets))
}

pub async fn delete(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let removed = db::assets::delete(&state.pool, id, auth.id).await?;
    if removed == 0 {
        return Err(AppError::NotFound("Asset not found".to_string()));
    }
    Ok(Json(serde_json::json!({ "message": "Asset deleted successfully" })))
}
