//! Search endpoint

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::Deserialize;

use super::{with_facade, ApiError, ListResponse};
use crate::api::state::AppState;
use crate::types::Event;

/// Query parameters for search
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Search query string; empty matches nothing
    #[serde(default)]
    pub q: String,
    /// Maximum number of results
    pub limit: Option<i64>,
}

/// GET /api/events/search - Case-insensitive match on title and description
pub async fn search_events(
    State(state): State<Arc<AppState>>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<ListResponse<Event>>, ApiError> {
    let Query(params) = params?;
    let events = with_facade(&state, move |f| f.search(&params.q, params.limit)).await?;
    Ok(Json(events.into()))
}
