use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;
use uuid::Uuid;

use crate::auth::role::Role;
use crate::auth::token::{self, TokenClaims, TokenError, TokenPurpose};
use crate::error::AppError;
use crate::state::SharedState;

/// The authenticated identity attached to a request. Populated from a
/// verified access token; handlers receive it as an extractor and never see
/// a request that failed verification.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
    pub user_name: String,
    pub role: Role,
}

impl FromRequestParts<SharedState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        // A role-guard layer may already have verified this request.
        if let Some(user) = parts.extensions.get::<AuthUser>() {
            return Ok(user.clone());
        }

        let token = bearer_token(parts).ok_or_else(|| {
            AppError::Unauthorized("Missing authentication token".to_string())
        })?;

        let claims = token::verify(TokenPurpose::Access, &token, &state.config.tokens)
            .map_err(|e| match e {
                TokenError::Expired => AppError::Unauthorized("Token expired".to_string()),
                TokenError::Invalid => AppError::Unauthorized("Invalid token".to_string()),
            })?;

        match claims {
            TokenClaims::Access {
                sub,
                email,
                user_name,
                role,
            } => Ok(AuthUser {
                id: sub,
                email,
                user_name,
                role,
            }),
            _ => Err(AppError::Unauthorized("Invalid token".to_string())),
        }
    }
}

/// Optional identity for public routes that behave differently for
/// authenticated callers (e.g. view tracking). Never rejects.
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub Option<AuthUser>);

impl FromRequestParts<SharedState> for MaybeAuthUser {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        Ok(MaybeAuthUser(
            AuthUser::from_request_parts(parts, state).await.ok(),
        ))
    }
}

/// Bearer token from the Authorization header, falling back to the
/// `access_token` cookie.
fn bearer_token(parts: &Parts) -> Option<String> {
    if let Some(auth_header) = parts.headers.get("authorization") {
        if let Ok(auth_str) = auth_header.to_str() {
            if let Some(token) = auth_str.strip_prefix("Bearer ") {
                return Some(token.to_string());
            }
        }
    }

    let jar = CookieJar::from_headers(&parts.headers);
    jar.get("access_token").map(|c| c.value().to_string())
}
