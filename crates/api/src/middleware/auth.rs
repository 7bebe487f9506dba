//! Admin gating for moderation endpoints.
//!
//! Identity comes from an external provider as an HS256 bearer token. Only
//! the `role` claim matters here: it must be `admin`.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::Authorization;
use axum_extra::TypedHeader;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

pub const ADMIN_ROLE: &str = "admin";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    pub exp: i64,
}

/// A caller whose token carries the admin role.
#[derive(Debug, Clone)]
pub struct AdminUser {
    pub email: String,
}

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::Unauthorized)?;

        let claims = verify_token(bearer.token(), &state.config().jwt_secret)?;
        if claims.role.as_deref() != Some(ADMIN_ROLE) {
            tracing::warn!(sub = %claims.sub, "non-admin token on admin endpoint");
            return Err(ApiError::Forbidden("admin role required".to_string()));
        }

        Ok(AdminUser {
            email: claims.email.unwrap_or(claims.sub),
        })
    }
}

pub fn verify_token(token: &str, secret: &str) -> Result<Claims, ApiError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map(|data| data.claims)
    .map_err(|err| {
        tracing::debug!("rejected bearer token: {err}");
        ApiError::Unauthorized
    })
}

/// Mint a token the way the identity provider does. Used by local tooling
/// and tests.
pub fn issue_token(
    secret: &str,
    email: &str,
    role: Option<&str>,
    ttl: Duration,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = Claims {
        sub: email.to_string(),
        email: Some(email.to_string()),
        role: role.map(str::to_string),
        exp: (Utc::now() + ttl).timestamp(),
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_verifies() {
        let token = issue_token("s3cret", "admin@campus.edu", Some(ADMIN_ROLE), Duration::hours(1)).unwrap();
        let claims = verify_token(&token, "s3cret").unwrap();
        assert_eq!(claims.email.as_deref(), Some("admin@campus.edu"));
        assert_eq!(claims.role.as_deref(), Some(ADMIN_ROLE));
    }

    #[test]
    fn wrong_secret_is_unauthorized() {
        let token = issue_token("s3cret", "a@x", None, Duration::hours(1)).unwrap();
        assert!(matches!(verify_token(&token, "other"), Err(ApiError::Unauthorized)));
    }

    #[test]
    fn expired_token_is_unauthorized() {
        let token = issue_token("s3cret", "a@x", Some(ADMIN_ROLE), Duration::hours(-2)).unwrap();
        assert!(matches!(verify_token(&token, "s3cret"), Err(ApiError::Unauthorized)));
    }
}
