//! HTTP server setup with Axum

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    response::Html,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::rest::{events, search, stats};
use super::state::AppState;
use crate::{APP_NAME, VERSION};

/// Create the Axum router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    // CORS configuration - allow all origins
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        // REST API endpoints
        .route(
            "/api/events",
            get(events::list_events).post(events::create_event),
        )
        .route("/api/events/search", get(search::search_events))
        .route(
            "/api/events/:id",
            get(events::get_event)
                .patch(events::update_event)
                .delete(events::delete_event),
        )
        .route("/api/stats", get(stats::get_stats))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Bind and serve until Ctrl+C
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    let local = listener.local_addr()?;

    info!("{} v{} starting", APP_NAME, VERSION);
    info!("Storage: {}", state.facade.store().backend_description());
    info!("Application: http://{}", local);
    info!("API: http://{}/api/events", local);

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("{} shutting down. May your records be preserved eternally", APP_NAME);
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    app: &'static str,
    version: &'static str,
    message: &'static str,
}

/// Health check endpoint
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        app: APP_NAME,
        version: VERSION,
        message: "May the heavens bless your journey",
    })
}

/// Landing page
async fn root() -> Html<String> {
    Html(format!(
        r#"<!doctype html>
<html>
  <head>
    <title>{name}</title>
    <style>
      body {{ font-family: sans-serif; background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
             color: white; display: flex; justify-content: center; align-items: center;
             height: 100vh; margin: 0; }}
      .container {{ text-align: center; padding: 40px; background: rgba(255, 255, 255, 0.1);
                    border-radius: 20px; }}
      a {{ color: #FFD700; text-decoration: none; margin: 0 15px; }}
    </style>
  </head>
  <body>
    <div class="container">
      <h1>{name}</h1>
      <p>Record your journey with celestial elegance</p>
      <p><a href="/api/events">Events</a><a href="/api/stats">Statistics</a><a href="/health">Health</a></p>
      <p>Version {version}</p>
    </div>
  </body>
</html>
"#,
        name = APP_NAME,
        version = VERSION
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event_store::EventStore;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::util::ServiceExt;

    fn app() -> Router {
        let state = Arc::new(AppState::new(Arc::new(EventStore::in_memory())));
        create_router(state)
    }

    #[tokio::test]
    async fn test_health_check() {
        let response = app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["status"], "healthy");
        assert_eq!(value["version"], VERSION);
    }

    #[tokio::test]
    async fn test_root_page_mentions_version() {
        let response = app()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains(VERSION));
        assert!(html.contains(APP_NAME));
    }
}
