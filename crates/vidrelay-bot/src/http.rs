//! Operator-facing HTTP surface.
//!
//! Two public endpoints, no authentication and no part of the delivery
//! contract:
//!
//! - `GET /`: status, the active storage mode and catalog size
//! - `GET /health`: liveness probe

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use vidrelay_store::{StorageMode, Store};

/// Shared state for the HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// The process-wide store, for mode and catalog reporting.
    pub store: Arc<dyn Store>,
}

/// Status report for `GET /`.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    /// Always `"ok"` when the process is serving.
    pub status: &'static str,
    /// Which storage backend the process selected at startup.
    pub storage: StorageMode,
    /// Number of videos in the catalog.
    pub catalog_size: usize,
}

/// Health check response for `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: &'static str,
    /// Service version.
    pub version: &'static str,
}

/// Create the status router.
pub fn router(state: HttpState) -> Router {
    Router::new()
        .route("/", get(status))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn status(State(state): State<HttpState>) -> impl IntoResponse {
    let response = StatusResponse {
        status: "ok",
        storage: state.store.mode(),
        catalog_size: state.store.catalog_size(),
    };

    (StatusCode::OK, Json(response))
}

async fn health() -> impl IntoResponse {
    let response = HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    };

    (StatusCode::OK, Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_test::TestServer;
    use chrono::DateTime;
    use vidrelay_core::VideoId;
    use vidrelay_store::{MemoryStore, VideoRecord};

    fn test_server() -> (TestServer, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let server = TestServer::new(router(HttpState {
            store: store.clone(),
        }))
        .unwrap();
        (server, store)
    }

    #[tokio::test]
    async fn health_is_ok() {
        let (server, _store) = test_server();

        let response = server.get("/health").await;
        response.assert_status_ok();

        let body: serde_json::Value = response.json();
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn status_reports_mode_and_catalog() {
        let (server, store) = test_server();
        store.record_video(&VideoRecord::new(
            VideoId::new(1),
            DateTime::from_timestamp(100, 0).unwrap(),
        ));

        let response = server.get("/").await;
        response.assert_status_ok();

        let body: serde_json::Value = response.json();
        assert_eq!(body["storage"], "volatile");
        assert_eq!(body["catalog_size"], 1);
    }
}
