//! Authenticated operator extractor.

use axum::{extract::FromRequestParts, http::request::Parts};
use std::str::FromStr;
use uuid::Uuid;

use domain::models::Role;
use shared::jwt::{extract_user_id, JwtConfig, JwtError};

use crate::error::ApiError;

/// Authenticated operator identity extracted from a validated access token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub role: Role,
}

impl AuthUser {
    /// Validates an access token and builds the identity from its claims.
    pub fn from_token(jwt: &JwtConfig, token: &str) -> Result<Self, JwtError> {
        let claims = jwt.validate_access_token(token)?;
        let user_id = extract_user_id(&claims)?;
        let role = claims
            .role
            .as_deref()
            .and_then(|r| Role::from_str(r).ok())
            .ok_or(JwtError::InvalidToken)?;

        Ok(Self { user_id, role })
    }
}

/// Pulls the identity that `require_auth` stored in request extensions.
#[async_trait::async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(|| ApiError::Unauthorized("Authentication required".to_string()))
    }
}
