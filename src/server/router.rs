//! Top-level router assembly

use super::exposure::GraphQLExposure;
use super::host::ServerHost;
use axum::{Json, Router, routing::get};
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Build the complete application router: health checks plus GraphQL,
/// wrapped in request tracing and permissive CORS.
pub fn build_router(host: Arc<ServerHost>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
        .merge(GraphQLExposure::build_router(host))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "storefront"
    }))
}
