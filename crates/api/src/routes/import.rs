//! Appeal import endpoint.

use axum::{
    extract::{Multipart, State},
    response::IntoResponse,
};

use crate::app::AppState;
use crate::error::ApiError;
use crate::response::ok;
use crate::services::import::ImportService;

/// Accepts a multipart upload with a `file` field holding an .xlsx workbook
/// and returns the per-row import outcome.
pub async fn import_appeals(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let mut upload = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Validation(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() == Some("file") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::Validation(format!("Failed to read upload: {}", e)))?;
            upload = Some(bytes);
            break;
        }
    }

    let bytes = upload.ok_or_else(|| ApiError::Validation("No file uploaded".into()))?;

    let summary = ImportService::new(state.pool.clone())
        .import_xlsx(&bytes)
        .await
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    Ok(ok(summary))
}
