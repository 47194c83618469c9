//! HTTP/WebSocket server for the matching engine.

use exchange_server::config::Config;
use exchange_server::server;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;
    tracing::info!(
        symbol = %config.symbol,
        addr = %config.socket_addr_string(),
        price_digits = config.price_digits,
        quantity_digits = config.quantity_digits,
        "starting exchange-server"
    );

    server::run(config).await
}
