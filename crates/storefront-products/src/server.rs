//! Product directory server implementation
//!
//! This module contains the ProductServer implementation.

use serde_json::Value;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, error, info};

use storefront_catalog_store::{NewProduct, Product, ProductStorage, StoreHealth};

use crate::config::ProductServiceConfig;
use crate::error::{ProductServiceError, ProductServiceResult};

/// Main server implementation
#[derive(Clone)]
pub struct ProductServer {
    /// Configuration
    pub config: ProductServiceConfig,

    /// Product backing store
    store: Arc<dyn ProductStorage>,
}

/// Manual Debug implementation that doesn't try to debug the trait object
impl std::fmt::Debug for ProductServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductServer")
            .field("config", &self.config)
            .finish()
    }
}

impl ProductServer {
    /// Create a new ProductServer
    pub fn new(config: ProductServiceConfig, store: Arc<dyn ProductStorage>) -> Self {
        Self { config, store }
    }

    /// Bind the configured address and serve until Ctrl-C
    pub async fn run(self) -> ProductServiceResult<()> {
        info!("Starting product directory service");

        self.store.ensure_initialized().await?;

        let listener =
            TcpListener::bind((self.config.bind_address.as_str(), self.config.port)).await?;
        self.serve(listener, shutdown_signal()).await
    }

    /// Serve on an already bound listener until `shutdown` resolves
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> ProductServiceResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr: SocketAddr = listener.local_addr()?;
        info!("Listening on {}", addr);

        let app = crate::api::build_router(Arc::new(self));
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Product directory service stopped");
        Ok(())
    }

    /// List every product in stored order
    pub async fn list_products(&self) -> Vec<Product> {
        let products = self.store.load().await;
        debug!(count = products.len(), "Listing products");
        products
    }

    /// Fetch one product by id
    pub async fn get_product(&self, id: u64) -> ProductServiceResult<Product> {
        self.store
            .get(id)
            .await
            .ok_or_else(|| ProductServiceError::NotFound(id.to_string()))
    }

    /// Validate a create payload and append the product to the store
    pub async fn create_product(&self, payload: &Value) -> ProductServiceResult<Product> {
        let new_product = parse_new_product(payload)?;
        let created = self.store.append(new_product).await?;
        info!(id = created.id, name = %created.name, "Product created");
        Ok(created)
    }

    /// Probe the backing store for the health endpoint
    pub async fn check_store_health(&self) -> ProductServiceResult<StoreHealth> {
        self.store.health_check().await.map_err(|e| {
            error!(error = %e, "Product store health check failed");
            ProductServiceError::from(e)
        })
    }
}

/// Extract `nome` and `preco` from a create payload
fn parse_new_product(payload: &Value) -> ProductServiceResult<NewProduct> {
    let fields = payload
        .as_object()
        .ok_or_else(|| ProductServiceError::InvalidInput("payload is not an object".to_string()))?;

    let (name, price) = match (fields.get("nome"), fields.get("preco")) {
        (Some(name), Some(price)) => (name, price),
        _ => {
            return Err(ProductServiceError::InvalidInput(
                "missing 'nome' or 'preco'".to_string(),
            ))
        }
    };

    let name = name
        .as_str()
        .ok_or_else(|| ProductServiceError::InvalidInput("'nome' must be a string".to_string()))?;
    let price = match price {
        Value::Number(price) => price.clone(),
        _ => {
            return Err(ProductServiceError::InvalidInput(
                "'preco' must be a number".to_string(),
            ))
        }
    };

    Ok(NewProduct::new(name, price))
}

/// Resolves on Ctrl-C
pub async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received, shutting down gracefully"),
        Err(err) => {
            error!("Unable to listen for shutdown signal: {}", err);
            std::future::pending::<()>().await
        }
    }
}
