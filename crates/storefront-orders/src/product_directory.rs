//! Client for the product directory service
//!
//! One lookup is one `GET {base}/produtos/{ref}`. There are no retries: the
//! first outcome is final and is classified into a [`LookupError`] that the
//! order handler maps to its own responses.

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use serde_json::Value;
use std::error::Error as StdError;
use std::io::ErrorKind;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::config::OrderServiceConfig;
use crate::error::{OrderServiceError, OrderServiceResult};

/// Upper bound for establishing the TCP connection
const CONNECT_TIMEOUT: Duration = Duration::from_secs(3);

/// The part of a product record the order service cares about
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ProductRecord {
    /// Absent when the directory omits `nome`
    #[serde(rename = "nome", default)]
    pub name: Option<Value>,
}

/// Outcome of a lookup that did not find the product
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// The directory answered 404
    #[error("product not found")]
    NotFound,

    /// The directory answered with any other non-200 status
    #[error("unexpected status {0}")]
    UnexpectedStatus(u16),

    /// The directory could not be connected to, or dropped the connection
    #[error("connection failed: {0}")]
    Unreachable(String),

    /// Anything else: response timeouts, undecodable bodies, bad URLs
    #[error("{0}")]
    Unexpected(String),
}

/// Interface for product lookups
#[async_trait]
pub trait ProductDirectory: Send + Sync {
    /// Look up one product by its reference, as it appears in the URL path
    async fn lookup_product(&self, product_ref: &str) -> Result<ProductRecord, LookupError>;
}

/// reqwest implementation of [`ProductDirectory`]
#[derive(Debug, Clone)]
pub struct HttpProductDirectory {
    base_url: Url,
    client: Client,
}

impl HttpProductDirectory {
    /// Create a client for `base_url` whose requests give up after `timeout`
    pub fn new(base_url: Url, timeout: Duration) -> OrderServiceResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(CONNECT_TIMEOUT))
            .build()
            .map_err(|e| OrderServiceError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { base_url, client })
    }

    pub fn from_config(config: &OrderServiceConfig) -> OrderServiceResult<Self> {
        Self::new(config.product_service_base_url()?, config.lookup_timeout())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `{base}/produtos/{product_ref}`, with the reference percent-encoded as one segment
    fn product_url(&self, product_ref: &str) -> Result<Url, LookupError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                LookupError::Unexpected(format!("Base URL {} cannot carry a path", self.base_url))
            })?;
            segments.pop_if_empty().push("produtos").push(product_ref);
        }
        Ok(url)
    }

    /// Maps a transport error to a LookupError
    ///
    /// Connect failures (connect timeouts included) and connections closed
    /// or reset by the directory are `Unreachable`; a response timeout is not.
    fn map_http_error(error: reqwest::Error) -> LookupError {
        if error.is_connect() {
            LookupError::Unreachable(error.to_string())
        } else if error.is_timeout() {
            LookupError::Unexpected(format!("Request timeout: {}", error))
        } else if is_disconnect(&error) {
            LookupError::Unreachable(error.to_string())
        } else {
            LookupError::Unexpected(format!("HTTP error: {}", error))
        }
    }
}

/// Whether the source chain shows the peer closing or resetting the connection
fn is_disconnect(error: &(dyn StdError + 'static)) -> bool {
    let mut current = Some(error);
    while let Some(err) = current {
        if let Some(hyper_err) = err.downcast_ref::<hyper::Error>() {
            if hyper_err.is_closed() || hyper_err.is_canceled() || hyper_err.is_incomplete_message() {
                return true;
            }
        }
        if let Some(io_err) = err.downcast_ref::<std::io::Error>() {
            if matches!(
                io_err.kind(),
                ErrorKind::ConnectionReset
                    | ErrorKind::ConnectionAborted
                    | ErrorKind::BrokenPipe
                    | ErrorKind::UnexpectedEof
            ) {
                return true;
            }
        }
        current = err.source();
    }
    false
}

#[async_trait]
impl ProductDirectory for HttpProductDirectory {
    #[instrument(skip(self))]
    async fn lookup_product(&self, product_ref: &str) -> Result<ProductRecord, LookupError> {
        let url = self.product_url(product_ref)?;
        debug!(%url, "Looking up product");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(Self::map_http_error)?;

        match response.status() {
            StatusCode::OK => response.json::<ProductRecord>().await.map_err(|e| {
                if e.is_timeout() {
                    LookupError::Unexpected(format!("Request timeout: {}", e))
                } else {
                    LookupError::Unexpected(format!("Failed to parse response: {}", e))
                }
            }),
            StatusCode::NOT_FOUND => Err(LookupError::NotFound),
            status => Err(LookupError::UnexpectedStatus(status.as_u16())),
        }
    }
}
