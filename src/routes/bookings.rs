use axum::Json;
use axum::extract::{Path, State};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::auth::role::Role;
use crate::db;
use crate::error::AppError;
use crate::models::Booking;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct CreateBooking {
    pub service_id: Uuid,
    pub event_date: DateTime<Utc>,
    pub note: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateStatus {
    pub status: String,
}

pub async fn create(
    auth: AuthUser,
    State(state): State<SharedState>,
    Json(req): Json<CreateBooking>,
) -> Result<Json<Booking>, AppError> {
    let service = db::services::find_by_id(&state.pool, req.service_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Service not found".to_string()))?;

    let booking = db::bookings::create(
        &state.pool,
        auth.id,
        service.id,
        service.vendor_id,
        req.event_date,
        req.note.as_deref().filter(|s| !s.is_empty()),
    )
    .await?;

    Ok(Json(booking))
}

/// Each caller sees their own side: users their bookings, vendors the
/// bookings placed against their services, admins everything.
pub async fn list(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<Vec<Booking>>, AppError> {
    let bookings = match auth.role {
        Role::User => db::bookings::list_by_account(&state.pool, auth.id).await?,
        Role::Vendor => db::bookings::list_by_vendor(&state.pool, auth.id).await?,
        Role::Admin | Role::SuperAdmin => db::bookings::list_all(&state.pool).await?,
    };
    Ok(Json(bookings))
}

pub async fn get(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Booking>, AppError> {
    let booking = db::bookings::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

    let can_view = booking.account_id == auth.id
        || booking.vendor_id == auth.id
        || matches!(auth.role, Role::Admin | Role::SuperAdmin);
    if !can_view {
        return Err(AppError::Forbidden(
            "You do not have access to this booking".to_string(),
        ));
    }

    Ok(Json(booking))
}

pub async fn update_status(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateStatus>,
) -> Result<Json<Booking>, AppError> {
    let status = req.status.to_lowercase();
    if !["confirmed", "cancelled", "completed"].contains(&status.as_str()) {
        return Err(AppError::Validation(format!("Invalid status: {status}")));
    }

    let booking = db::bookings::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

    let allowed = transition_allowed(&auth, &booking, &status);
    if !allowed {
        return Err(AppError::Forbidden(
            "This status change is not permitted".to_string(),
        ));
    }

    let updated = db::bookings::update_status(&state.pool, booking.id, &status).await?;

    notify_status_change(&state, &updated).await;

    Ok(Json(updated))
}

/// Vendors confirm, complete, or cancel bookings against their services;
/// users may cancel their own while still pending or confirmed.
fn transition_allowed(auth: &AuthUser, booking: &Booking, status: &str) -> bool {
    let is_vendor = booking.vendor_id == auth.id && auth.role == Role::Vendor;
    let is_owner = booking.account_id == auth.id && auth.role == Role::User;

    match (booking.status.as_str(), status) {
        ("pending", "confirmed") => is_vendor,
        ("confirmed", "completed") => is_vendor,
        ("pending", "cancelled") | ("confirmed", "cancelled") => is_vendor || is_owner,
        _ => false,
    }
}

async fn notify_status_change(state: &SharedState, booking: &Booking) {
    let Some(mailer) = &state.system_mailer else {
        return;
    };

    let user = match db::accounts::find_by_id(&state.pool, booking.account_id).await {
        Ok(Some(user)) => user,
        _ => return,
    };
    let service = match db::services::find_by_id(&state.pool, booking.service_id).await {
        Ok(Some(service)) => service,
        _ => return,
    };

    if let Err(e) = mailer
        .send_booking_update(&user.email, &service.title, &booking.status)
        .await
    {
        tracing::error!("Failed to send booking update email: {e}");
    }
}
