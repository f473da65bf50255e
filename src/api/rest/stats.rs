//! Statistics endpoint

use std::sync::Arc;

use axum::{extract::State, Json};

use super::{with_facade, ApiError};
use crate::api::state::AppState;
use crate::types::EventStats;

/// GET /api/stats - Total plus zero-filled counts per category and importance
pub async fn get_stats(State(state): State<Arc<AppState>>) -> Result<Json<EventStats>, ApiError> {
    let stats = with_facade(&state, |f| f.stats()).await?;
    Ok(Json(stats))
}
