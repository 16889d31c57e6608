//! Capability-based route authorization.
//!
//! Each protected route group declares the single [`Permission`] it needs;
//! this middleware resolves it against the authenticated operator's role.
//! Roles map to permission sets once, in the domain crate, so there are no
//! scattered role comparisons in handlers.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

use domain::models::Permission;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::auth::AuthUser;

/// Middleware that requires the given permission.
///
/// Must run after `require_auth`, which stores the operator identity in
/// request extensions.
pub async fn require_permission(
    State((_state, permission)): State<(AppState, Permission)>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let user = match req.extensions().get::<AuthUser>() {
        Some(user) => user,
        None => {
            return ApiError::Unauthorized("Authentication required".to_string()).into_response();
        }
    };

    if !user.role.permits(permission) {
        tracing::debug!(
            role = %user.role,
            permission = permission.as_str(),
            "Permission denied"
        );
        return ApiError::Forbidden("Insufficient permissions".to_string()).into_response();
    }

    next.run(req).await
}
