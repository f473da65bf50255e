//! HTTP API for the archive
//!
//! A thin axum binding over the [`QueryFacade`](crate::facade::QueryFacade):
//! REST endpoints under `/api`, plus a landing page and health check.

pub mod http;
pub mod rest;
pub mod state;

pub use http::{create_router, serve};
pub use state::AppState;
