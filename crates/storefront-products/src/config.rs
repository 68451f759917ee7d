//! Configuration for the product directory service
//!
//! This module contains the configuration types and loading functionality.

use serde::{Deserialize, Serialize};
use std::env;
use tracing::{info, warn};

use crate::error::{ProductServiceError, ProductServiceResult};

/// Prefix of a `products_file` value that selects the in-memory store
pub const MEMORY_STORE_PREFIX: &str = "memory://";

/// Product directory service configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductServiceConfig {
    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Host to bind to
    #[serde(default = "default_host")]
    pub bind_address: String,

    /// Path of the JSON backing file, or `memory://...` for a volatile store
    #[serde(default = "default_products_file")]
    pub products_file: String,
}

fn default_port() -> u16 {
    5001
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_products_file() -> String {
    "products.json".to_string()
}

impl ProductServiceConfig {
    /// Load configuration from environment variables
    pub fn load() -> ProductServiceResult<Self> {
        Self::load_from(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source
    pub fn load_from<F>(lookup: F) -> ProductServiceResult<Self>
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

        if let Some(products_file) = lookup("PRODUCTS_FILE") {
            config.products_file = products_file;
        }

        if config.products_file.trim().is_empty() {
            return Err(ProductServiceError::ConfigError(
                "PRODUCTS_FILE must not be empty".to_string(),
            ));
        }

        if config.uses_memory_store() {
            warn!("Using in-memory product store - products are lost on restart!");
        }

        info!("Loaded product service configuration");
        Ok(config)
    }

    pub fn uses_memory_store(&self) -> bool {
        self.products_file.starts_with(MEMORY_STORE_PREFIX)
    }
}

impl Default for ProductServiceConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            bind_address: default_host(),
            products_file: default_products_file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load_with(vars: &[(&str, &str)]) -> ProductServiceResult<ProductServiceConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ProductServiceConfig::load_from(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_match_the_deployment() {
        let config = load_with(&[]).unwrap();
        assert_eq!(config, ProductServiceConfig::default());
        assert_eq!(config.port, 5001);
        assert_eq!(config.products_file, "products.json");
        assert!(!config.uses_memory_store());
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = load_with(&[
            ("SERVER_PORT", "6001"),
            ("SERVER_HOST", "127.0.0.1"),
            ("PRODUCTS_FILE", "memory://dev"),
        ])
        .unwrap();

        assert_eq!(config.port, 6001);
        assert_eq!(config.bind_address, "127.0.0.1");
        assert!(config.uses_memory_store());
    }

    #[test]
    fn invalid_port_keeps_default() {
        let config = load_with(&[("SERVER_PORT", "not-a-port")]).unwrap();
        assert_eq!(config.port, 5001);
    }

    #[test]
    fn empty_products_file_is_rejected() {
        let err = load_with(&[("PRODUCTS_FILE", "  ")]).unwrap_err();
        assert!(matches!(err, ProductServiceError::ConfigError(_)));
    }
}
