//! Error types for the product directory service

use storefront_catalog_store::CatalogStoreError;
use thiserror::Error;

/// Product service error types
#[derive(Error, Debug)]
pub enum ProductServiceError {
    /// Body was JSON but lacked `nome`/`preco` (or had them with the wrong type)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Body was not JSON at all
    #[error("Request body is not JSON: {0}")]
    NotJson(String),

    /// No product with the requested id
    #[error("Product {0} not found")]
    NotFound(String),

    /// Backing store error
    #[error("Catalog store error: {0}")]
    StoreError(#[from] CatalogStoreError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Internal server error
    #[error("Internal server error: {0}")]
    InternalError(String),
}

/// Result type for product service operations
pub type ProductServiceResult<T> = Result<T, ProductServiceError>;

impl From<std::io::Error> for ProductServiceError {
    fn from(err: std::io::Error) -> Self {
        ProductServiceError::InternalError(format!("IO error: {}", err))
    }
}
