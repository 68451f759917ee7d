//! Configuration for the order intake service
//!
//! This module contains the configuration types and loading functionality.

use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use tracing::{info, warn};

use crate::error::{OrderServiceError, OrderServiceResult};

/// Order intake service configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderServiceConfig {
    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Host to bind to
    #[serde(default = "default_host")]
    pub bind_address: String,

    /// Base URL of the product directory service
    #[serde(default = "default_product_service_url")]
    pub product_service_url: String,

    /// Timeout for one product lookup, in seconds
    #[serde(default = "default_lookup_timeout")]
    pub lookup_timeout_secs: u64,
}

fn default_port() -> u16 {
    5002
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

// Resolved by the container network in the compose deployment
fn default_product_service_url() -> String {
    "http://servico-produto:5001".to_string()
}

fn default_lookup_timeout() -> u64 {
    10
}

impl OrderServiceConfig {
    /// Load configuration from environment variables
    pub fn load() -> OrderServiceResult<Self> {
        Self::load_from(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source
    pub fn load_from<F>(lookup: F) -> OrderServiceResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(port) = lookup("SERVER_PORT") {
            if let Ok(port) = port.parse::<u16>() {
                config.port = port;
            } else {
                warn!("Invalid SERVER_PORT value: {}", port);
            }
        }

        if let Some(host) = lookup("SERVER_HOST") {
            config.bind_address = host;
        }

        if let Some(url) = lookup("PRODUTO_SERVICE_URL") {
            config.product_service_url = url;
        }

        if let Some(timeout) = lookup("PRODUCT_LOOKUP_TIMEOUT_SECS") {
            match timeout.parse::<u64>() {
                Ok(secs) if secs > 0 => config.lookup_timeout_secs = secs,
                _ => warn!("Invalid PRODUCT_LOOKUP_TIMEOUT_SECS value: {}", timeout),
            }
        }

        config.product_service_base_url()?;

        info!(
            product_service_url = %config.product_service_url,
            timeout_secs = config.lookup_timeout_secs,
            "Loaded order service configuration"
        );
        Ok(config)
    }

    /// Parsed base URL of the product directory
    pub fn product_service_base_url(&self) -> OrderServiceResult<Url> {
        if self.product_service_url.trim().is_empty() {
            return Err(OrderServiceError::ConfigError(
                "PRODUTO_SERVICE_URL is required".to_string(),
            ));
        }

        let url = Url::parse(&self.product_service_url).map_err(|e| {
            OrderServiceError::ConfigError(format!(
                "Invalid PRODUTO_SERVICE_URL {}: {}",
                self.product_service_url, e
            ))
        })?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            scheme => Err(OrderServiceError::ConfigError(format!(
                "Unsupported PRODUTO_SERVICE_URL scheme: {}",
                scheme
            ))),
        }
    }

    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_secs(self.lookup_timeout_secs)
    }
}

impl Default for OrderServiceConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            bind_address: default_host(),
            product_service_url: default_product_service_url(),
            lookup_timeout_secs: default_lookup_timeout(),
        }
    }
}
