//! Event endpoints

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use super::{with_facade, ApiError, ListResponse};
use crate::api::state::AppState;
use crate::facade::{AddEventInput, UpdateEventInput};
use crate::types::Event;

/// Query parameters for listing events
#[derive(Debug, Deserialize)]
pub struct ListEventsParams {
    /// Maximum number of events to return (default 10)
    pub limit: Option<i64>,
    /// Only events of this category
    pub category: Option<String>,
}

/// POST /api/events - Add an event
pub async fn create_event(
    State(state): State<Arc<AppState>>,
    body: Result<Json<AddEventInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Event>), ApiError> {
    let Json(input) = body?;
    let event = with_facade(&state, move |f| f.add(input)).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// GET /api/events - Newest events first, optionally filtered by category
pub async fn list_events(
    State(state): State<Arc<AppState>>,
    params: Result<Query<ListEventsParams>, QueryRejection>,
) -> Result<Json<ListResponse<Event>>, ApiError> {
    let Query(params) = params?;
    let events = with_facade(&state, move |f| {
        f.list(params.limit, params.category.as_deref())
    })
    .await?;
    Ok(Json(events.into()))
}

/// GET /api/events/:id - Get a single event
pub async fn get_event(
    State(state): State<Arc<AppState>>,
    id: Result<Path<u64>, PathRejection>,
) -> Result<Json<Event>, ApiError> {
    let Path(id) = id?;
    let event = with_facade(&state, move |f| f.get(id)).await?;
    Ok(Json(event))
}

/// PATCH /api/events/:id - Update supplied fields
pub async fn update_event(
    State(state): State<Arc<AppState>>,
    id: Result<Path<u64>, PathRejection>,
    body: Result<Json<UpdateEventInput>, JsonRejection>,
) -> Result<Json<Event>, ApiError> {
    let Path(id) = id?;
    let Json(input) = body?;
    let event = with_facade(&state, move |f| f.update(id, input)).await?;
    Ok(Json(event))
}

/// DELETE /api/events/:id
pub async fn delete_event(
    State(state): State<Arc<AppState>>,
    id: Result<Path<u64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    with_facade(&state, move |f| f.delete(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
