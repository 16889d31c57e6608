//! Admin dashboard statistics endpoint.

use axum::{extract::State, response::IntoResponse};

use persistence::repositories::StatsRepository;

use crate::app::AppState;
use crate::error::ApiError;
use crate::response::ok;

pub async fn admin_stats(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let stats = StatsRepository::new(state.pool.clone()).fetch().await?;
    Ok(ok(stats))
}
