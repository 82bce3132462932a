use axum::Json;
use axum::extract::{Path, State};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::models::{Event, EventTask, EventVendor, SubEvent};
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct UpsertEvent {
    pub name: String,
    pub description: Option<String>,
    pub event_date: Option<DateTime<Utc>>,
    pub budget: Option<f64>,
}

#[derive(Deserialize)]
pub struct UpsertSubEvent {
    pub name: String,
    pub description: Option<String>,
    pub sub_event_date: Option<DateTime<Utc>>,
    pub budget: Option<f64>,
}

#[derive(Deserialize)]
pub struct CreateTask {
    pub title: String,
    pub sub_event_id: Option<Uuid>,
    pub due_date: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
pub struct UpdateTask {
    pub title: String,
    pub done: bool,
    pub due_date: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
pub struct AddVendor {
    pub service_id: Uuid,
}

pub async fn list(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<Vec<Event>>, AppError> {
    let events = db::events::list_by_account(&state.pool, auth.id).await?;
    Ok(Json(events))
}

pub async fn create(
    auth: AuthUser,
    State(state): State<SharedState>,
    Json(req): Json<UpsertEvent>,
) -> Result<Json<Event>, AppError> {
    if req.name.trim().is_empty() {
        return Err(AppError::Validation("Event name is required".to_string()));
    }

    let event = db::events::create(
        &state.pool,
        auth.id,
        req.name.trim(),
        req.description.as_deref().filter(|s| !s.is_empty()),
        req.event_date,
        req.budget,
    )
    .await?;

    Ok(Json(event))
}

/// Event detail with its sub-events, tasks, and attached vendors.
pub async fn get(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let event = find_owned(&state, id, &auth).await?;

    let sub_events = db::events::list_sub_events(&state.pool, event.id).await?;
    let tasks = db::events::list_tasks(&state.pool, event.id).await?;
    let vendors = db::events::list_vendors(&state.pool, event.id).await?;

    Ok(Json(serde_json::json!({
        "event": event,
        "sub_events": sub_events,
        "tasks": tasks,
        "vendors": vendors,
    })))
}

pub async fn update(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpsertEvent>,
) -> Result<Json<Event>, AppError> {
    if req.name.trim().is_empty() {
        return Err(AppError::Validation("Event name is required".to_string()));
    }

    let event = db::events::update(
        &state.pool,
        id,
        auth.id,
        req.name.trim(),
        req.description.as_deref().filter(|s| !s.is_empty()),
        req.event_date,
        req.budget,
    )
    .await
    .map_err(|e| match e {
        sqlx::Error::RowNotFound => AppError::NotFound("Event not found".to_string()),
        _ => AppError::Database(e),
    })?;

    Ok(Json(event))
}

pub async fn delete(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let removed = db::events::delete(&state.pool, id, auth.id).await?;
    if removed == 0 {
        return Err(AppError::NotFound("Event not found".to_string()));
    }
    Ok(Json(serde_json::json!({ "message": "Event deleted successfully" })))
}

// ── Sub-events ──────────────────────────────────────────────────

pub async fn create_sub_event(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpsertSubEvent>,
) -> Result<Json<SubEvent>, AppError> {
    if req.name.trim().is_empty() {
        return Err(AppError::Validation(
            "Sub-event name is required".to_string(),
        ));
    }

    let event = find_owned(&state, id, &auth).await?;

    let sub_event = db::events::create_sub_event(
        &state.pool,
        event.id,
        req.name.trim(),
        req.description.as_deref().filter(|s| !s.is_empty()),
        req.sub_event_date,
        req.budget,
    )
    .await?;

    Ok(Json(sub_event))
}

pub async fn update_sub_event(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpsertSubEvent>,
) -> Result<Json<SubEvent>, AppError> {
    if req.name.trim().is_empty() {
        return Err(AppError::Validation(
            "Sub-event name is required".to_string(),
        ));
    }

    let sub_event = db::events::update_sub_event(
        &state.pool,
        id,
        auth.id,
        req.name.trim(),
        req.description.as_deref().filter(|s| !s.is_empty()),
        req.sub_event_date,
        req.budget,
    )
    .await
    .map_err(|e| match e {
        sqlx::Error::RowNotFound => AppError::NotFound("Sub-event not found".to_string()),
        _ => AppError::Database(e),
    })?;

    Ok(Json(sub_event))
}

pub async fn delete_sub_event(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let removed = db::events::delete_sub_event(&state.pool, id, auth.id).await?;
    if removed == 0 {
        return Err(AppError::NotFound("Sub-event not found".to_string()));
    }
    Ok(Json(serde_json::json!({ "message": "Sub-event deleted successfully" })))
}

// ── Tasks ───────────────────────────────────────────────────────

pub async fn create_task(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<CreateTask>,
) -> Result<Json<EventTask>, AppError> {
    if req.title.trim().is_empty() {
        return Err(AppError::Validation("Task title is required".to_string()));
    }

    let event = find_owned(&state, id, &auth).await?;

    // A sub-event task must reference a sub-event of this event.
    if let Some(sub_event_id) = req.sub_event_id {
        let sub_events = db::events::list_sub_events(&state.pool, event.id).await?;
        if !sub_events.iter().any(|s| s.id == sub_event_id) {
            return Err(AppError::NotFound("Sub-event not found".to_string()));
        }
    }

    let task = db::events::create_task(
        &state.pool,
        event.id,
        req.sub_event_id,
        req.title.trim(),
        req.due_date,
    )
    .await?;

    Ok(Json(task))
}

pub async fn update_task(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateTask>,
) -> Result<Json<EventTask>, AppError> {
    if req.title.trim().is_empty() {
        return Err(AppError::Validation("Task title is required".to_string()));
    }

    let task = db::events::update_task(
        &state.pool,
        id,
        auth.id,
        req.title.trim(),
        req.done,
        req.due_date,
    )
    .await
    .map_err(|e| match e {
        sqlx::Error::RowNotFound => AppError::NotFound("Task not found".to_string()),
        _ => AppError::Database(e),
    })?;

    Ok(Json(task))
}

pub async fn delete_task(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let removed = db::events::delete_task(&state.pool, id, auth.id).await?;
    if removed == 0 {
        return Err(AppError::NotFound("Task not found".to_string()));
    }
    Ok(Json(serde_json::json!({ "message": "Task deleted successfully" })))
}

// ── Attached vendors ────────────────────────────────────────────

pub async fn add_vendor(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<AddVendor>,
) -> Result<Json<EventVendor>, AppError> {
    let event = find_owned(&state, id, &auth).await?;

    db::services::find_by_id(&state.pool, req.service_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Service not found".to_string()))?;

    let attached = db::events::add_vendor(&state.pool, event.id, req.service_id)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::Conflict("Vendor is already added to this event".to_string())
            }
            _ => AppError::Database(e),
        })?;

    Ok(Json(attached))
}

pub async fn remove_vendor(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path((id, service_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<serde_json::Value>, AppError> {
    let event = find_owned(&state, id, &auth).await?;

    let removed = db::events::remove_vendor(&state.pool, event.id, service_id).await?;
    if removed == 0 {
        return Err(AppError::NotFound(
            "Vendor is not attached to this event".to_string(),
        ));
    }
    Ok(Json(serde_json::json!({ "message": "Vendor removed from event" })))
}

async fn find_owned(state: &SharedState, id: Uuid, auth: &AuthUser) -> Result<Event, AppError> {
    db::events::find_by_id(&state.pool, id, auth.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Event not found".to_string()))
}
