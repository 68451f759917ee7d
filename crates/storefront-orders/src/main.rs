use anyhow::{Context, Result};
use storefront_monitoring::MonitoringConfig;
use storefront_orders::OrderServiceConfig;

#[tokio::main]
async fn main() -> Result<()> {
    storefront_monitoring::init(MonitoringConfig::from_env("storefront-orders"))
        .context("Failed to initialize monitoring")?;

    let config = OrderServiceConfig::load().context("Failed to load configuration")?;

    storefront_orders::run(config)
        .await
        .context("Server error")?;

    Ok(())
}
