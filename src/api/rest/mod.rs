//! REST API module for HTTP endpoints
//!
//! - `POST   /api/events` - Add an event
//! - `GET    /api/events` - List events (`limit`, `category`)
//! - `GET    /api/events/search` - Search events (`q`, `limit`)
//! - `GET    /api/events/:id` - Get one event
//! - `PATCH  /api/events/:id` - Update an event
//! - `DELETE /api/events/:id` - Delete an event
//! - `GET    /api/stats` - Totals per category and importance

pub mod events;
pub mod search;
pub mod stats;

use std::sync::Arc;

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;

use super::state::AppState;
use crate::error::{ArchiveError, ArchiveResult};
use crate::facade::QueryFacade;

/// Wrapper for list endpoints
#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub data: Vec<T>,
    pub total: usize,
}

impl<T> From<Vec<T>> for ListResponse<T> {
    fn from(data: Vec<T>) -> Self {
        let total = data.len();
        Self { data, total }
    }
}

/// API error response
#[derive(Debug, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    pub status: StatusCode,
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: message.into(),
            code: "BAD_REQUEST".to_string(),
            field: None,
        }
    }
}

impl From<ArchiveError> for ApiError {
    fn from(e: ArchiveError) -> Self {
        let status = match &e {
            ArchiveError::Validation { .. } => StatusCode::BAD_REQUEST,
            ArchiveError::NotFound(_) => StatusCode::NOT_FOUND,
            ArchiveError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            error!(error = %e, "Request failed");
        }
        Self {
            status,
            error: e.to_string(),
            code: e.code().to_string(),
            field: e.field().map(str::to_string),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self {
            field: Some("id".to_string()),
            ..ApiError::bad_request(rejection.body_text())
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

/// Run a façade call on the blocking pool; backends may touch the disk
pub(crate) async fn with_facade<T, F>(state: &Arc<AppState>, op: F) -> ArchiveResult<T>
where
    F: FnOnce(&QueryFacade) -> ArchiveResult<T> + Send + 'static,
    T: Send + 'static,
{
    let facade = state.facade.clone();
    tokio::task::spawn_blocking(move || op(&facade))
        .await
        .map_err(|e| ArchiveError::storage(format!("worker task failed: {}", e)))?
}
