//! Authentication endpoints.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use serde_json::json;
use validator::Validate;

use domain::models::UserProfile;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::response::ok;
use crate::services::auth::{AuthError, AuthResult, AuthService};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    #[validate(length(min = 2, max = 200, message = "Name must be at least 2 characters"))]
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub user: UserProfile,
    pub access_token: String,
    pub refresh_token: String,
}

impl From<AuthResult> for AuthResponse {
    fn from(result: AuthResult) -> Self {
        Self {
            user: result.user,
            access_token: result.access_token,
            refresh_token: result.refresh_token,
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::EmailAlreadyExists => ApiError::Conflict("Email already registered".into()),
            AuthError::InvalidCredentials => ApiError::Unauthorized("Invalid credentials".into()),
            AuthError::InvalidRefreshToken => {
                ApiError::Unauthorized("Invalid refresh token".into())
            }
            AuthError::UserNotFound => ApiError::NotFound("User not found".into()),
            AuthError::DatabaseError(e) => e.into(),
            AuthError::TokenError(e) => ApiError::Internal(format!("Token error: {}", e)),
            AuthError::PasswordError(e) => ApiError::Internal(format!("Password error: {}", e)),
        }
    }
}

fn service(state: &AppState) -> AuthService {
    AuthService::new(state.pool.clone(), state.jwt.as_ref().clone())
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    req.validate()?;

    let result = service(&state).login(&req.email, &req.password).await?;
    Ok(ok(AuthResponse::from(result)))
}

/// Registration returns only the new user projection; the account then
/// signs in through the login endpoint to obtain tokens.
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    req.validate()?;

    let user = service(&state)
        .register(&req.email, &req.password, &req.name)
        .await?;
    Ok((StatusCode::CREATED, ok(user)))
}

pub async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let access_token = service(&state)
        .refresh(&req.refresh_token)
        .await
        .map_err(|err| match err {
            // A token for a deleted account is just an invalid token
            AuthError::UserNotFound => {
                ApiError::Unauthorized("Invalid refresh token".into())
            }
            other => other.into(),
        })?;

    Ok(ok(json!({ "accessToken": access_token })))
}

pub async fn me(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    let profile = service(&state).me(user.user_id).await?;
    Ok(ok(profile))
}
