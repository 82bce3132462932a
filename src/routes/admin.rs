use axum::Json;
use axum::extract::{Path, State};
use serde::Deserialize;
use std::str::FromStr;
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::auth::role::Role;
use crate::db;
use crate::error::AppError;
use crate::models::Account;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct UpdateRole {
    pub role: String,
}

pub async fn list_accounts(
    State(state): State<SharedState>,
) -> Result<Json<Vec<Account>>, AppError> {
    let accounts = db::accounts::list_all(&state.pool).await?;
    Ok(Json(accounts))
}

pub async fn update_role(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateRole>,
) -> Result<Json<Account>, AppError> {
    let role = Role::from_str(&req.role).map_err(AppError::Validation)?;

    // Only a super admin may grant or revoke admin-level roles.
    if matches!(role, Role::Admin | Role::SuperAdmin) && auth.role != Role::SuperAdmin {
        return Err(AppError::Forbidden(
            "Only a super admin can assign admin roles".to_string(),
        ));
    }

    let account = db::accounts::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Account not found".to_string()))?;

    db::accounts::update_role(&state.pool, account.id, role).await?;

    let updated = db::accounts::find_by_id(&state.pool, account.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Account not found".to_string()))?;

    Ok(Json(updated))
}

pub async fn delete_account(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    if id == auth.id {
        return Err(AppError::Validation(
            "You cannot delete your own account".to_string(),
        ));
    }

    db::accounts::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Account not found".to_string()))?;

    db::accounts::delete(&state.pool, id).await?;

    Ok(Json(serde_json::json!({ "message": "Account deleted successfully" })))
}
