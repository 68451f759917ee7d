use anyhow::{Context, Result};
use storefront_monitoring::MonitoringConfig;
use storefront_products::ProductServiceConfig;

#[tokio::main]
async fn main() -> Result<()> {
    storefront_monitoring::init(MonitoringConfig::from_env("storefront-products"))
        .context("Failed to initialize monitoring")?;

    let config = ProductServiceConfig::load().context("Failed to load configuration")?;

    storefront_products::run(config)
        .await
        .context("Server error")?;

    Ok(())
}
