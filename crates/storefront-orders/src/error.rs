//! Error types for the order intake service
//!
//! Every upstream outcome maps onto this vocabulary. Upstream status codes
//! are never passed through.

use thiserror::Error;

use crate::product_directory::LookupError;

/// Order service error types
#[derive(Error, Debug)]
pub enum OrderServiceError {
    /// Body was JSON but had no `produto_id`
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Body was not JSON at all
    #[error("Request body is not JSON: {0}")]
    NotJson(String),

    /// Product directory reported the product as missing
    #[error("Product {0} not found")]
    ProductNotFound(String),

    /// Product directory answered with an unexpected status
    #[error("Product service returned status {0}")]
    UpstreamError(u16),

    /// Product directory could not be reached
    #[error("Product service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Internal server error
    #[error("Internal server error: {0}")]
    InternalError(String),
}

/// Result type for order service operations
pub type OrderServiceResult<T> = Result<T, OrderServiceError>;

impl OrderServiceError {
    /// Map a failed lookup of `product_ref` to the service vocabulary
    pub fn from_lookup(product_ref: &str, err: LookupError) -> Self {
        match err {
            LookupError::NotFound => OrderServiceError::ProductNotFound(product_ref.to_string()),
            LookupError::UnexpectedStatus(status) => OrderServiceError::UpstreamError(status),
            LookupError::Unreachable(detail) => OrderServiceError::ServiceUnavailable(detail),
            LookupError::Unexpected(detail) => OrderServiceError::InternalError(detail),
        }
    }
}

impl From<std::io::Error> for OrderServiceError {
    fn from(err: std::io::Error) -> Self {
        OrderServiceError::InternalError(format!("IO error: {}", err))
    }
}
