//! JWT authentication middleware.
//!
//! Validates the Bearer access token and stores the authenticated operator
//! in request extensions for handlers and the authorization middleware.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::auth::AuthUser;

/// Middleware that requires a valid access token.
///
/// The token's role claim is trusted for the lifetime of the token; route
/// authorization never re-reads the users table.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok());

    let token = match auth_header.and_then(|h| h.strip_prefix("Bearer ")) {
        Some(token) => token,
        None => {
            return ApiError::Unauthorized("Missing or invalid Authorization header".to_string())
                .into_response();
        }
    };

    match AuthUser::from_token(&state.jwt, token) {
        Ok(user) => {
            req.extensions_mut().insert(user);
            next.run(req).await
        }
        Err(e) => {
            tracing::debug!("Access token rejected: {}", e);
            ApiError::Unauthorized("Invalid or expired token".to_string()).into_response()
        }
    }
}
