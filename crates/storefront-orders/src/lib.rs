//!
//! Storefront order intake service
//!
//! Accepts orders after confirming, with one synchronous call, that the
//! referenced product exists in the product directory service.

use std::sync::Arc;

/// API module
pub mod api;

/// Configuration module
pub mod config;

/// Error module
pub mod error;

/// Order payloads
pub mod order;

/// Product directory client
pub mod product_directory;

/// Server module
pub mod server;

// Re-export key types
pub use config::OrderServiceConfig;
pub use error::{OrderServiceError, OrderServiceResult};
pub use product_directory::{HttpProductDirectory, LookupError, ProductDirectory, ProductRecord};
pub use server::OrderServer;

/// Run function
pub async fn run(config: OrderServiceConfig) -> OrderServiceResult<()> {
    let directory = HttpProductDirectory::from_config(&config)?;
    tracing::info!(url = %directory.base_url(), "Using product directory");

    OrderServer::new(config, Arc::new(directory)).run().await
}
