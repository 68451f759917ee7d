//! Monitoring setup shared by the Storefront services.
//!
//! Both service binaries call [`init`] once at startup, before loading their
//! own configuration, so configuration warnings are already captured.

use tracing::info;

pub mod logging;

pub use logging::init_test_tracing;

/// Configuration for initializing the monitoring system
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitoringConfig {
    /// Service name attached to the startup log line
    pub service_name: String,
    /// Log level filter (e.g., "info,storefront_orders=debug"); `RUST_LOG` wins when set
    pub log_filter: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
    /// Environment (dev, staging, prod)
    pub environment: String,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            service_name: "storefront".to_string(),
            log_filter: "info".to_string(),
            json: false,
            environment: "development".to_string(),
        }
    }
}

impl MonitoringConfig {
    /// Build from `LOG_LEVEL`, `LOG_FORMAT` and `ENVIRONMENT`
    pub fn from_env(service_name: &str) -> Self {
        Self::from_lookup(service_name, |key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source
    pub fn from_lookup<F>(service_name: &str, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            service_name: service_name.to_string(),
            log_filter: lookup("LOG_LEVEL").unwrap_or(defaults.log_filter),
            json: lookup("LOG_FORMAT")
                .map(|format| format.eq_ignore_ascii_case("json"))
                .unwrap_or(defaults.json),
            environment: lookup("ENVIRONMENT").unwrap_or(defaults.environment),
        }
    }
}

/// Initialize monitoring system
pub fn init(config: MonitoringConfig) -> anyhow::Result<()> {
    logging::init_logging(&config)?;

    info!(
        service_name = %config.service_name,
        environment = %config.environment,
        "Monitoring initialized"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_config_defaults() {
        let config = MonitoringConfig::default();
        assert_eq!(config.log_filter, "info");
        assert!(!config.json);
    }

    #[test]
    fn test_config_from_lookup() {
        let vars: HashMap<&str, &str> = [("LOG_LEVEL", "debug"), ("LOG_FORMAT", "JSON")]
            .into_iter()
            .collect();
        let config = MonitoringConfig::from_lookup("storefront-orders", |key| {
            vars.get(key).map(|v| v.to_string())
        });

        assert_eq!(config.service_name, "storefront-orders");
        assert_eq!(config.log_filter, "debug");
        assert!(config.json);
        assert_eq!(config.environment, "development");
    }
}
