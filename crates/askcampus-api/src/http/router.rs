//! Axum router configuration with middleware.
//!
//! Two routes: the chat endpoint and a liveness probe.
//! Middleware: permissive CORS and request tracing.

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/", get(service_identity))
        .route("/api/chat", post(handlers::chat::chat))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /api/ - Liveness probe returning a fixed identity payload.
async fn service_identity() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "name": "askcampus",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
