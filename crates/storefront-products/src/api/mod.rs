//! API module for the product directory service
//!
//! This module contains the routes and handlers.

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod errors;
pub mod health;
pub mod products;

use crate::server::ProductServer;

/// Build the router for API endpoints
pub fn build_router(server: Arc<ProductServer>) -> Router {
    Router::new()
        .route(
            "/produtos",
            get(products::list_products_handler).post(products::create_product_handler),
        )
        .route("/produtos/:id", get(products::get_product_handler))
        .route("/health", get(health::health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(server)
}

pub use errors::ApiError;
