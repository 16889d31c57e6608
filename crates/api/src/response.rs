//! Success envelope for API responses.

use axum::Json;
use serde::Serialize;

/// Success envelope matching the `{success: true, data}` contract.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

/// Wraps a payload in the success envelope.
pub fn ok<T: Serialize>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse {
        success: true,
        data,
    })
}
