//! Health check endpoint.

use axum::response::IntoResponse;
use chrono::Utc;
use serde_json::json;

use crate::response::ok;

pub async fn health_check() -> impl IntoResponse {
    ok(json!({
        "status": "ok",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}
