use axum::Json;
use axum::extract::State;
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use serde::{Deserialize, Serialize};

use crate::auth::extractor::AuthUser;
use crate::auth::password;
use crate::auth::role::Role;
use crate::auth::token::{self, TokenClaims, TokenError, TokenPurpose};
use crate::config::TokenSecrets;
use crate::db;
use crate::db::vendor_profiles::NewVendorProfile;
use crate::error::AppError;
use crate::models::Account;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub user_name: String,
}

#[derive(Deserialize)]
pub struct RegisterVendorRequest {
    pub email: String,
    pub password: String,
    pub user_name: String,
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

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Deserialize)]
pub struct ResetPasswordRequest {
    pub token: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Deserialize)]
pub struct VerifyEmailRequest {
    pub token: String,
}

#[derive(Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

fn auth_cookies(access_token: &str, refresh_token: &str, secrets: &TokenSecrets) -> CookieJar {
    let access = Cookie::build(("access_token", access_token.to_string()))
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(secrets.access.ttl_secs))
        .build();

    let refresh = Cookie::build(("refresh_token", refresh_token.to_string()))
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(secrets.refresh.ttl_secs))
        .build();

    CookieJar::new().add(access).add(refresh)
}

fn clear_auth_cookies() -> CookieJar {
    let access = Cookie::build(("access_token", ""))
        .path("/")
        .max_age(time::Duration::ZERO)
        .build();
    let refresh = Cookie::build(("refresh_token", ""))
        .path("/")
        .max_age(time::Duration::ZERO)
        .build();
    CookieJar::new().add(access).add(refresh)
}

/// Issue the access/refresh pair for an account, as cookies + JSON body.
fn open_session(
    state: &SharedState,
    account: &Account,
) -> Result<(CookieJar, Json<AuthResponse>), AppError> {
    let access_claims = TokenClaims::Access {
        sub: account.id,
        email: account.email.clone(),
        user_name: account.user_name.clone(),
        role: account.role,
    };
    let access_token =
        token::issue(&access_claims, &state.config.tokens).map_err(AppError::Internal)?;

    let refresh_claims = TokenClaims::Refresh { sub: account.id };
    let refresh_token =
        token::issue(&refresh_claims, &state.config.tokens).map_err(AppError::Internal)?;

    let jar = auth_cookies(&access_token, &refresh_token, &state.config.tokens);
    Ok((
        jar,
        Json(AuthResponse {
            access_token,
            refresh_token,
        }),
    ))
}

/// Issue an email-verification token and mail it out. With no system SMTP the
/// token is logged instead so local setups can still complete the flow.
async fn send_verification(state: &SharedState, account: &Account) -> Result<(), AppError> {
    let claims = TokenClaims::EmailVerification {
        sub: account.id,
        email: account.email.clone(),
    };
    let verify_token = token::issue(&claims, &state.config.tokens).map_err(AppError::Internal)?;

    match &state.system_mailer {
        Some(mailer) => {
            let verify_url = format!(
                "{}/auth/verify-email?token={verify_token}",
                state.config.base_url
            );
            mailer
                .send_email_verification(&account.email, &verify_url)
                .await
                .map_err(AppError::Delivery)?;
        }
        None => {
            tracing::warn!(
                "System SMTP not configured. Email verification token: {verify_token}"
            );
        }
    }
    Ok(())
}

pub async fn register(
    State(state): State<SharedState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(CookieJar, Json<AuthResponse>), AppError> {
    let email = normalize_email(&req.email)?;
    validate_password(&req.password)?;
    if req.user_name.trim().is_empty() {
        return Err(AppError::Validation("Name is required".to_string()));
    }

    let pw_hash = password::hash(&req.password).map_err(AppError::Internal)?;

    let account = db::accounts::create(
        &state.pool,
        &email,
        &pw_hash,
        req.user_name.trim(),
        Role::User,
    )
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            AppError::Conflict("An account with this email already exists".to_string())
        }
        _ => AppError::Database(e),
    })?;

    // Verification is best-effort at registration; a resend endpoint exists.
    if let Err(e) = send_verification(&state, &account).await {
        tracing::error!("Failed to send verification email: {e}");
    }

    open_session(&state, &account)
}

pub async fn register_vendor(
    State(state): State<SharedState>,
    Json(req): Json<RegisterVendorRequest>,
) -> Result<(CookieJar, Json<AuthResponse>), AppError> {
    let email = normalize_email(&req.email)?;
    validate_password(&req.password)?;
    if req.user_name.trim().is_empty() {
        return Err(AppError::Validation("Name is required".to_string()));
    }
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
    validate_phone(&req.phone_number)?;
    if req.country.trim().is_empty() || req.city.trim().is_empty() {
        return Err(AppError::Validation(
            "Country and city are required".to_string(),
        ));
    }

    let pw_hash = password::hash(&req.password).map_err(AppError::Internal)?;

    let service_types: Vec<String> = req
        .service_types
        .iter()
        .map(|s| s.trim().to_lowercase())
        .collect();
    let business_name = req.business_name.trim().to_lowercase();
    let business_category = req.business_category.trim().to_lowercase();

    let mut tx = state.pool.begin().await?;

    let account = db::accounts::create(
        &mut *tx,
        &email,
        &pw_hash,
        req.user_name.trim(),
        Role::Vendor,
    )
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            AppError::Conflict("An account with this email already exists".to_string())
        }
        _ => AppError::Database(e),
    })?;

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
    db::vendor_profiles::create(&mut *tx, account.id, &profile).await?;

    tx.commit().await?;

    if let Err(e) = send_verification(&state, &account).await {
        tracing::error!("Failed to send verification email: {e}");
    }

    open_session(&state, &account)
}

pub async fn login(
    State(state): State<SharedState>,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<AuthResponse>), AppError> {
    if state.login_limiter.check(&req.email).is_err() {
        return Err(AppError::RateLimited(
            "Too many login attempts. Please try again later.".to_string(),
        ));
    }

    let account = db::accounts::find_by_email(&state.pool, &req.email)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))?;

    let valid = password::verify(&req.password, &account.password_hash)
        .map_err(AppError::Internal)?;

    if !valid {
        state.login_limiter.record_failure(&req.email);
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    }

    open_session(&state, &account)
}

pub async fn refresh(
    State(state): State<SharedState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<AuthResponse>), AppError> {
    let refresh_value = jar
        .get("refresh_token")
        .map(|c| c.value().to_string())
        .ok_or_else(|| AppError::Unauthorized("Missing refresh token".to_string()))?;

    let claims = token::verify(
        TokenPurpose::Refresh,
        &refresh_value,
        &state.config.tokens,
    )
    .map_err(|e| match e {
        TokenError::Expired => AppError::Unauthorized("Refresh token expired".to_string()),
        TokenError::Invalid => AppError::Unauthorized("Invalid refresh token".to_string()),
    })?;

    let account = db::accounts::find_by_id(&state.pool, claims.subject())
        .await?
        .ok_or_else(|| AppError::Unauthorized("Account not found".to_string()))?;

    open_session(&state, &account)
}

pub async fn logout() -> Result<(CookieJar, Json<MessageResponse>), AppError> {
    Ok((
        clear_auth_cookies(),
        Json(MessageResponse {
            message: "Logged out successfully".to_string(),
        }),
    ))
}

pub async fn forgot_password(
    State(state): State<SharedState>,
    Json(req): Json<ForgotPasswordRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let email = normalize_email(&req.email)?;

    let account = db::accounts::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(|| AppError::NotFound("No account with this email exists".to_string()))?;

    let claims = TokenClaims::PasswordReset { sub: account.id };
    let reset_token = token::issue(&claims, &state.config.tokens).map_err(AppError::Internal)?;

    // Overwrites any outstanding token: last-issued-wins.
    db::accounts::set_reset_token(&state.pool, account.id, &reset_token).await?;

    match &state.system_mailer {
        Some(mailer) => {
            let reset_url = format!(
                "{}/auth/reset-password?token={reset_token}",
                state.config.base_url
            );
            // The token is already persisted; a failed send surfaces as a
            // delivery error and a repeat request reissues.
            mailer
                .send_password_reset(&account.email, &reset_url)
                .await
                .map_err(AppError::Delivery)?;
        }
        None => {
            tracing::warn!("System SMTP not configured. Password reset token: {reset_token}");
        }
    }

    Ok(Json(MessageResponse {
        message: "Reset password link sent".to_string(),
    }))
}

pub async fn reset_password(
    State(state): State<SharedState>,
    Json(req): Json<ResetPasswordRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    validate_password(&req.password)?;

    let claims = token::verify(TokenPurpose::PasswordReset, &req.token, &state.config.tokens)
        .map_err(|_| AppError::Validation("Invalid or expired reset token".to_string()))?;

    let pw_hash = password::hash(&req.password).map_err(AppError::Internal)?;

    // Valid only if it is exactly the stored token; consuming clears it so a
    // replayed confirmation fails.
    let consumed =
        db::accounts::consume_reset_token(&state.pool, claims.subject(), &req.token, &pw_hash)
            .await?;
    if !consumed {
        return Err(AppError::Validation(
            "Invalid or expired reset token".to_string(),
        ));
    }

    Ok(Json(MessageResponse {
        message: "Password reset successfully".to_string(),
    }))
}

pub async fn change_password(
    State(state): State<SharedState>,
    auth: AuthUser,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<(CookieJar, Json<AuthResponse>), AppError> {
    validate_password(&req.new_password)?;

    let account = db::accounts::find_by_id(&state.pool, auth.id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Account not found".to_string()))?;

    let valid = password::verify(&req.current_password, &account.password_hash)
        .map_err(AppError::Internal)?;

    if !valid {
        return Err(AppError::Unauthorized(
            "Current password is incorrect".to_string(),
        ));
    }

    let pw_hash = password::hash(&req.new_password).map_err(AppError::Internal)?;
    db::accounts::update_password(&state.pool, account.id, &pw_hash).await?;

    open_session(&state, &account)
}

pub async fn verify_email(
    State(state): State<SharedState>,
    Json(req): Json<VerifyEmailRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let claims = token::verify(
        TokenPurpose::EmailVerification,
        &req.token,
        &state.config.tokens,
    )
    .map_err(|_| AppError::Validation("Invalid or expired verification token".to_string()))?;

    let TokenClaims::EmailVerification { sub, email } = claims else {
        return Err(AppError::Validation(
            "Invalid or expired verification token".to_string(),
        ));
    };

    let account = db::accounts::find_by_id(&state.pool, sub)
        .await?
        .ok_or_else(|| AppError::NotFound("Account not found".to_string()))?;

    if !account.email.eq_ignore_ascii_case(&email) {
        return Err(AppError::Validation(
            "Invalid or expired verification token".to_string(),
        ));
    }

    db::accounts::mark_email_verified(&state.pool, account.id).await?;

    Ok(Json(MessageResponse {
        message: "Email verified successfully".to_string(),
    }))
}

pub async fn resend_verification(
    State(state): State<SharedState>,
    auth: AuthUser,
) -> Result<Json<MessageResponse>, AppError> {
    let account = db::accounts::find_by_id(&state.pool, auth.id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Account not found".to_string()))?;

    if account.email_verified {
        return Err(AppError::Validation("Email is already verified".to_string()));
    }

    send_verification(&state, &account).await?;

    Ok(Json(MessageResponse {
        message: "Verification email sent".to_string(),
    }))
}

fn normalize_email(email: &str) -> Result<String, AppError> {
    let email = email.trim().to_lowercase();
    if email.is_empty() {
        return Err(AppError::Validation("Email is required".to_string()));
    }
    if !email.contains('@') || email.starts_with('@') || email.ends_with('@') {
        return Err(AppError::Validation("Invalid email address".to_string()));
    }
    Ok(email)
}

fn validate_password(password: &str) -> Result<(), AppError> {
    if password.len() < 6 {
        return Err(AppError::Validation(
            "Password must be at least 6 characters long".to_string(),
        ));
    }
    if password.len() > 128 {
        return Err(AppError::Validation(
            "Password must not exceed 128 characters".to_string(),
        ));
    }
    if !password.chars().any(|c| c.is_ascii_alphabetic()) {
        return Err(AppError::Validation(
            "Password must include at least one letter".to_string(),
        ));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(AppError::Validation(
            "Password must include at least one number".to_string(),
        ));
    }
    Ok(())
}

fn validate_phone(phone: &str) -> Result<(), AppError> {
    if phone.len() < 10 {
        return Err(AppError::Validation(
            "Phone number must be at least 10 digits long".to_string(),
        ));
    }
    if !phone.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::Validation(
            "Phone number must only contain digits".to_string(),
        ));
    }
    Ok(())
}
