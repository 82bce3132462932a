use axum::extract::{FromRequestParts, Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::auth::extractor::AuthUser;
use crate::auth::role::Role;
use crate::error::AppError;
use crate::state::SharedState;

/// Route-group layers gating on a role allow-list. Verification happens here,
/// before any handler logic; the identity is stashed in request extensions so
/// the `AuthUser` extractor does not verify twice.

pub async fn require_auth(
    State(state): State<SharedState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    gate(
        &[Role::User, Role::Vendor, Role::Admin, Role::SuperAdmin],
        state,
        req,
        next,
    )
    .await
}

pub async fn require_user(
    State(state): State<SharedState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    gate(&[Role::User], state, req, next).await
}

pub async fn require_vendor(
    State(state): State<SharedState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    gate(&[Role::Vendor], state, req, next).await
}

pub async fn require_admin(
    State(state): State<SharedState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    gate(&[Role::Admin, Role::SuperAdmin], state, req, next).await
}

async fn gate(
    allowed: &[Role],
    state: SharedState,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let auth = AuthUser::from_request_parts(&mut parts, &state).await?;
    if !allowed.contains(&auth.role) {
        return Err(AppError::Forbidden(
            "You do not have permission to access this resource".to_string(),
        ));
    }

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(auth);
    Ok(next.run(req).await)
}
