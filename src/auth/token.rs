use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::role::Role;
use crate::config::{TokenConfig, TokenSecrets};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenPurpose {
    Access,
    Refresh,
    PasswordReset,
    EmailVerification,
}

/// Claims embedded in a signed token, one fixed schema per purpose. The
/// purpose tag travels inside the token, so a verifier statically knows
/// which fields are present after a successful decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "purpose", rename_all = "snake_case")]
pub enum TokenClaims {
    Access {
        sub: Uuid,
        email: String,
        user_name: String,
        role: Role,
    },
    Refresh {
        sub: Uuid,
    },
    PasswordReset {
        sub: Uuid,
    },
    EmailVerification {
        sub: Uuid,
        email: String,
    },
}

impl TokenClaims {
    pub fn purpose(&self) -> TokenPurpose {
        match self {
            TokenClaims::Access { .. } => TokenPurpose::Access,
            TokenClaims::Refresh { .. } => TokenPurpose::Refresh,
            TokenClaims::PasswordReset { .. } => TokenPurpose::PasswordReset,
            TokenClaims::EmailVerification { .. } => TokenPurpose::EmailVerification,
        }
    }

    pub fn subject(&self) -> Uuid {
        match self {
            TokenClaims::Access { sub, .. }
            | TokenClaims::Refresh { sub }
            | TokenClaims::PasswordReset { sub }
            | TokenClaims::EmailVerification { sub, .. } => *sub,
        }
    }
}

/// Verification failures. `Expired` and `Invalid` are distinct so callers can
/// prompt re-authentication on the former and reject outright on the latter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    Expired,
    Invalid,
}

#[derive(Serialize, Deserialize)]
struct SignedClaims {
    exp: i64,
    #[serde(flatten)]
    claims: TokenClaims,
}

/// Sign `claims` with the secret for their purpose, expiring after that
/// purpose's configured TTL.
pub fn issue(claims: &TokenClaims, secrets: &TokenSecrets) -> Result<String, String> {
    let cfg = purpose_config(secrets, claims.purpose());
    let exp = (Utc::now() + Duration::seconds(cfg.ttl_secs)).timestamp();
    sign(claims, &cfg.secret, exp)
}

/// Decode and validate a token under the secret for `purpose`. A token signed
/// for another purpose fails here (distinct secrets), as does a token whose
/// embedded purpose tag disagrees with the expected one.
pub fn verify(
    purpose: TokenPurpose,
    token: &str,
    secrets: &TokenSecrets,
) -> Result<TokenClaims, TokenError> {
    let cfg = purpose_config(secrets, purpose);
    let mut validation = Validation::default();
    validation.leeway = 0;

    match decode::<SignedClaims>(
        token,
        &DecodingKey::from_secret(cfg.secret.as_bytes()),
        &validation,
    ) {
        Ok(data) if data.claims.claims.purpose() == purpose => Ok(data.claims.claims),
        Ok(_) => Err(TokenError::Invalid),
        Err(e) => match e.kind() {
            ErrorKind::ExpiredSignature => Err(TokenError::Expired),
            _ => Err(TokenError::Invalid),
        },
    }
}

fn sign(claims: &TokenClaims, secret: &str, exp: i64) -> Result<String, String> {
    encode(
        &Header::default(),
        &SignedClaims {
            exp,
            claims: claims.clone(),
        },
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| format!("Token encode failed: {e}"))
}

fn purpose_config(secrets: &TokenSecrets, purpose: TokenPurpose) -> &TokenConfig {
    match purpose {
        TokenPurpose::Access => &secrets.access,
        TokenPurpose::Refresh => &secrets.refresh,
        TokenPurpose::PasswordReset => &secrets.reset,
        TokenPurpose::EmailVerification => &secrets.email_verify,
    }
}
