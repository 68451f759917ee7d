//! API module for the order intake service

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod errors;
pub mod health;
pub mod orders;

use crate::server::OrderServer;

/// Build the router for API endpoints
pub fn build_router(server: Arc<OrderServer>) -> Router {
    Router::new()
        .route("/pedidos", post(orders::create_order_handler))
        .route("/health", get(health::health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(server)
}

pub use errors::ApiError;
