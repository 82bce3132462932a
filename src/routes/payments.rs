use axum::Json;
use axum::extract::{Path, State};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::auth::role::Role;
use crate::db;
use crate::error::AppError;
use crate::models::Payment;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct CreatePayment {
    pub booking_id: Option<Uuid>,
    pub subscription_id: Option<Uuid>,
    pub amount: f64,
    pub currency: Option<String>,
    pub provider: String,
}

#[derive(Deserialize)]
pub struct SettlePayment {
    pub status: String,
    pub provider_ref: Option<String>,
}

pub async fn create(
    auth: AuthUser,
    State(state): State<SharedState>,
    Json(req): Json<CreatePayment>,
) -> Result<Json<Payment>, AppError> {
    if req.amount <= 0.0 || !req.amount.is_finite() {
        return Err(AppError::Validation(
            "Amount must be a positive number".to_string(),
        ));
    }
    if req.provider.trim().is_empty() {
        return Err(AppError::Validation("Provider is required".to_string()));
    }
    if req.booking_id.is_some() == req.subscription_id.is_some() {
        return Err(AppError::Validation(
            "Exactly one of booking_id or subscription_id is required".to_string(),
        ));
    }

    // The payment target must exist and belong to the caller.
    if let Some(booking_id) = req.booking_id {
        let booking = db::bookings::find_by_id(&state.pool, booking_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;
        if booking.account_id != auth.id {
            return Err(AppError::Forbidden(
                "You do not have access to this booking".to_string(),
            ));
        }
    }
    if let Some(subscription_id) = req.subscription_id {
        let owned = db::subscriptions::list_by_vendor(&state.pool, auth.id)
            .await?
            .iter()
            .any(|s| s.id == subscription_id);
        if !owned {
            return Err(AppError::NotFound("Subscription not found".to_string()));
        }
    }

    let currency = req.currency.as_deref().unwrap_or("INR");
    let payment = db::payments::create(
        &state.pool,
        auth.id,
        req.booking_id,
        req.subscription_id,
        req.amount,
        currency,
        req.provider.trim(),
    )
    .await?;

    Ok(Json(payment))
}

pub async fn list(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<Vec<Payment>>, AppError> {
    let payments = db::payments::list_by_account(&state.pool, auth.id).await?;
    Ok(Json(payments))
}

pub async fn get(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Payment>, AppError> {
    let payment = db::payments::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Payment not found".to_string()))?;

    let can_view =
        payment.account_id == auth.id || matches!(auth.role, Role::Admin | Role::SuperAdmin);
    if !can_view {
        return Err(AppError::Forbidden(
            "You do not have access to this payment".to_string(),
        ));
    }

    Ok(Json(payment))
}

/// Record the gateway outcome for a pending payment.
pub async fn settle(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SettlePayment>,
) -> Result<Json<Payment>, AppError> {
    let status = req.status.to_lowercase();
    if !["succeeded", "failed"].contains(&status.as_str()) {
        return Err(AppError::Validation(format!("Invalid status: {status}")));
    }

    let payment = db::payments::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Payment not found".to_string()))?;

    let can_settle =
        payment.account_id == auth.id || matches!(auth.role, Role::Admin | Role::SuperAdmin);
    if !can_settle {
        return Err(AppError::Forbidden(
            "You do not have access to this payment".to_string(),
        ));
    }

    let settled = db::payments::settle(&state.pool, payment.id, &status, req.provider_ref.as_deref())
        .await?
        .ok_or_else(|| {
            AppError::Conflict("Payment has already been settled".to_string())
        })?;

    Ok(Json(settled))
}
