use axum::Json;
use axum::extract::{Path, State};
use chrono::{Duration, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::models::{Subscription, SubscriptionPlan};
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct UpsertPlan {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub duration_days: i32,
}

#[derive(Deserialize)]
pub struct Subscribe {
    pub plan_id: Uuid,
}

fn validate_plan(req: &UpsertPlan) -> Result<(), AppError> {
    if req.name.trim().is_empty() {
        return Err(AppError::Validation("Plan name is required".to_string()));
    }
    if req.price < 0.0 || !req.price.is_finite() {
        return Err(AppError::Validation(
            "Price must be a non-negative number".to_string(),
        ));
    }
    if req.duration_days <= 0 {
        return Err(AppError::Validation(
            "Duration must be at least one day".to_string(),
        ));
    }
    Ok(())
}

pub async fn list_plans(
    State(state): State<SharedState>,
) -> Result<Json<Vec<SubscriptionPlan>>, AppError> {
    let plans = db::subscriptions::list_plans(&state.pool).await?;
    Ok(Json(plans))
}

pub async fn create_plan(
    State(state): State<SharedState>,
    Json(req): Json<UpsertPlan>,
) -> Result<Json<SubscriptionPlan>, AppError> {
    validate_plan(&req)?;

    let plan = db::subscriptions::create_plan(
        &state.pool,
        req.name.trim(),
        req.description.as_deref().filter(|s| !s.is_empty()),
        req.price,
        req.duration_days,
    )
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            AppError::Conflict("A plan with this name already exists".to_string())
        }
        _ => AppError::Database(e),
    })?;

    Ok(Json(plan))
}

pub async fn update_plan(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpsertPlan>,
) -> Result<Json<SubscriptionPlan>, AppError> {
    validate_plan(&req)?;

    let plan = db::subscriptions::update_plan(
        &state.pool,
        id,
        req.name.trim(),
        req.description.as_deref().filter(|s| !s.is_empty()),
        req.price,
        req.duration_days,
    )
    .await
    .map_err(|e| match e {
        sqlx::Error::RowNotFound => AppError::NotFound("Plan not found".to_string()),
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            AppError::Conflict("A plan with this name already exists".to_string())
        }
        _ => AppError::Database(e),
    })?;

    Ok(Json(plan))
}

pub async fn delete_plan(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let removed = db::subscriptions::delete_plan(&state.pool, id).await?;
    if removed == 0 {
        return Err(AppError::NotFound("Plan not found".to_string()));
    }
    Ok(Json(serde_json::json!({ "message": "Plan deleted successfully" })))
}

pub async fn subscribe(
    auth: AuthUser,
    State(state): State<SharedState>,
    Json(req): Json<Subscribe>,
) -> Result<Json<Subscription>, AppError> {
    let plan = db::subscriptions::find_plan(&state.pool, req.plan_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Plan not found".to_string()))?;

    let ends_at = Utc::now() + Duration::days(plan.duration_days as i64);
    let subscription = db::subscriptions::create(&state.pool, auth.id, plan.id, ends_at).await?;

    Ok(Json(subscription))
}

pub async fn list_mine(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<Vec<Subscription>>, AppError> {
    let subscriptions = db::subscriptions::list_by_vendor(&state.pool, auth.id).await?;
    Ok(Json(subscriptions))
}

pub async fn cancel(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let cancelled = db::subscriptions::cancel(&state.pool, id, auth.id).await?;
    if cancelled == 0 {
        return Err(AppError::NotFound(
            "No active subscription with this id".to_string(),
        ));
    }
    Ok(Json(serde_json::json!({ "message": "Subscription cancelled" })))
}
