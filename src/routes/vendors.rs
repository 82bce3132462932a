use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::db::vendor_profiles::NewVendorProfile;
use crate::error::AppError;
use crate::models::VendorProfile;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct VendorFilter {
    pub category: Option<String>,
    pub city: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateProfile {
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
}

pub async fn list(
    State(state): State<SharedState>,
    Query(filter): Query<VendorFilter>,
) -> Result<Json<Vec<VendorProfile>>, AppError> {
    let vendors = db::vendor_profiles::list(
        &state.pool,
        filter.category.as_deref(),
        filter.city.as_deref(),
    )
    .await?;
    Ok(Json(vendors))
}

pub async fn get(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<VendorProfile>, AppError> {
    let vendor = db::vendor_profiles::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Vendor not found".to_string()))?;
    Ok(Json(vendor))
}

pub async fn me(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<VendorProfile>, AppError> {
    let profile = db::vendor_profiles::find_by_account(&state.pool, auth.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Vendor profile not found".to_string()))?;
    Ok(Json(profile))
}

pub async fn update_me(
    auth: AuthUser,
    State(state): State<SharedState>,
    Json(req): Json<UpdateProfile>,
) -> Result<Json<VendorProfile>, AppError> {
    if req.business_name.trim().is_empty() {
        return Err(AppError::Validation("Business name is required".to_string()));
    }
    if req.business_category.trim().is_empty() {
        return Err(AppError::Validation(
            "Business category is required".to_string(),
        ));
    }
    if req.service_types.is_empty() {
        return Err(AppError::Validation(
            "At least one service type is required".to_string(),
        ));
    }

    let service_types: Vec<String> = req
        .service_types
        .iter()
        .map(|s| s.trim().to_lowercase())
        .collect();
    let business_name = req.business_name.trim().to_lowercase();
    let business_category = req.business_category.trim().to_lowercase();

    let profile = NewVendorProfile {
        business_name: &business_name,
        business_category: &business_category,
        license_number: req.license_number.as_deref().filter(|s| !s.is_empty()),
        service_types: &service_types,
        description: req.description.as_deref().filter(|s| !s.is_empty()),
        logo_url: req.logo_url.as_deref().filter(|s| !s.is_empty()),
        phone_number: &req.phone_number,
        country: &req.country,
        state: req.state.as_deref().filter(|s| !s.is_empty()),
        city: &req.city,
        latitude: req.latitude,
        longitude: req.longitude,
        facebook_url: req.facebook_url.as_deref().filter(|s| !s.is_empty()),
        instagram_url: req.instagram_url.as_deref().filter(|s| !s.is_empty()),
    };

    let updated = db::vendor_profiles::update(&state.pool, auth.id, &profile)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => {
                AppError::NotFound("Vendor profile not found".to_string())
            }
            _ => AppError::Database(e),
        })?;

    Ok(Json(updated))
}
