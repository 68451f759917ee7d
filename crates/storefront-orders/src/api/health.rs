//! Health check endpoint for the order intake service

use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

use crate::server::OrderServer;

/// Health check handler
///
/// Does not call the product directory; it only reports where lookups go.
pub async fn health_check(State(server): State<Arc<OrderServer>>) -> impl IntoResponse {
    Json(json!({
        "status": "UP",
        "version": env!("CARGO_PKG_VERSION"),
        "dependencies": {
            "productService": {
                "url": server.config.product_service_url,
            },
        },
    }))
}
