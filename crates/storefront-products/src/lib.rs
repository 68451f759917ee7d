//!
//! Storefront product directory service
//!
//! Owns the product collection and exposes list, fetch and create over
//! HTTP/JSON. The collection is re-read from its backing store on every
//! request.

use std::sync::Arc;

use storefront_catalog_store::{InMemoryProductStore, JsonFileProductStore, ProductStorage};

/// API module
pub mod api;

/// Configuration module
pub mod config;

/// Error module
pub mod error;

/// Server module
pub mod server;

// Re-export key types
pub use config::ProductServiceConfig;
pub use error::{ProductServiceError, ProductServiceResult};
pub use server::ProductServer;

/// Run function
pub async fn run(config: ProductServiceConfig) -> ProductServiceResult<()> {
    let store = create_product_store(&config);
    ProductServer::new(config, store).run().await
}

/// Create the product store selected by the configuration
pub fn create_product_store(config: &ProductServiceConfig) -> Arc<dyn ProductStorage> {
    if config.uses_memory_store() {
        tracing::info!("Using in-memory product store");
        Arc::new(InMemoryProductStore::new())
    } else {
        tracing::info!(path = %config.products_file, "Using JSON file product store");
        Arc::new(JsonFileProductStore::new(&config.products_file))
    }
}
