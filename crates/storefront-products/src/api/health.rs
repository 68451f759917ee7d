//! Health check endpoint for the product directory service

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

use storefront_catalog_store::StoreHealth;

use crate::server::ProductServer;

/// Health check handler
///
/// Reports `UP`, `DEGRADED` (store readable but corrupt, reads return an
/// empty list) or `DOWN` (store unreadable) for the backing store. Only
/// `DOWN` turns the overall status into 503.
pub async fn health_check(State(server): State<Arc<ProductServer>>) -> impl IntoResponse {
    debug!("Health check requested");

    let store_status = match server.check_store_health().await {
        Ok(StoreHealth::Up) => "UP",
        Ok(StoreHealth::Degraded) => "DEGRADED",
        Err(_) => "DOWN",
    };

    let status = if store_status == "DOWN" {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    };

    let body = json!({
        "status": if store_status == "DOWN" { "DOWN" } else { "UP" },
        "version": env!("CARGO_PKG_VERSION"),
        "dependencies": {
            "productStore": { "status": store_status },
        },
    });

    (status, Json(body))
}
