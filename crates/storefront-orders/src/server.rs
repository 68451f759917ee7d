//! Order intake server implementation
//!
//! This module contains the OrderServer implementation.

use serde_json::Value;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use crate::config::OrderServiceConfig;
use crate::error::{OrderServiceError, OrderServiceResult};
use crate::order::{OrderConfirmation, OrderRequest};
use crate::product_directory::{LookupError, ProductDirectory};

/// Main server implementation
#[derive(Clone)]
pub struct OrderServer {
    /// Configuration
    pub config: OrderServiceConfig,

    /// Product directory client
    directory: Arc<dyn ProductDirectory>,
}

/// Manual Debug implementation that doesn't try to debug the trait object
impl std::fmt::Debug for OrderServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderServer")
            .field("config", &self.config)
            .finish()
    }
}

impl OrderServer {
    /// Create a new OrderServer
    pub fn new(config: OrderServiceConfig, directory: Arc<dyn ProductDirectory>) -> Self {
        Self { config, directory }
    }

    /// Bind the configured address and serve until Ctrl-C
    pub async fn run(self) -> OrderServiceResult<()> {
        info!("Starting order intake service");

        let listener =
            TcpListener::bind((self.config.bind_address.as_str(), self.config.port)).await?;
        self.serve(listener, shutdown_signal()).await
    }

    /// Serve on an already bound listener until `shutdown` resolves
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> OrderServiceResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr: SocketAddr = listener.local_addr()?;
        info!("Listening on {}", addr);

        let app = crate::api::build_router(Arc::new(self));
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Order intake service stopped");
        Ok(())
    }

    /// Validate an order and confirm it against the product directory
    pub async fn create_order(&self, payload: &Value) -> OrderServiceResult<OrderConfirmation> {
        let request = OrderRequest::from_payload(payload)?;
        let product_ref = request.product_ref();

        match self.directory.lookup_product(&product_ref).await {
            Ok(record) => {
                info!(product_id = %product_ref, product_name = ?record.name, "Product found, order accepted");
                Ok(OrderConfirmation::new(request.product_id, record.name))
            }
            Err(err) => {
                match &err {
                    LookupError::NotFound => {
                        warn!(product_id = %product_ref, "Product not found in product service")
                    }
                    LookupError::UnexpectedStatus(status) => {
                        error!(status, "Product service returned an unexpected status")
                    }
                    LookupError::Unreachable(detail) => error!(
                        url = %self.config.product_service_url,
                        %detail,
                        "Could not connect to product service"
                    ),
                    LookupError::Unexpected(detail) => {
                        error!(%detail, "Unexpected error while checking product")
                    }
                }
                Err(OrderServiceError::from_lookup(&product_ref, err))
            }
        }
    }
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
