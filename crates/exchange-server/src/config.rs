//! Configuration for the exchange HTTP server.
//!
//! Intentionally simple: defaults, overridable via environment
//! variables:
//!
//! - `EXCHANGE_SYMBOL`            (default: "BTC_USDT")
//! - `EXCHANGE_PRICE_DIGITS`      (default: "2")
//! - `EXCHANGE_QUANTITY_DIGITS`   (default: "4")
//! - `EXCHANGE_BIND_ADDR`         (default: "0.0.0.0")
//! - `EXCHANGE_PORT`              (default: "8080")
//! - `EXCHANGE_MATCH_THROTTLE_MS` (default: "0" = off)

use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::Context;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Instrument symbol served by this process.
    pub symbol: String,

    /// Fractional digits for price formatting and level aggregation.
    pub price_digits: u32,

    /// Fractional digits for quantity formatting.
    pub quantity_digits: u32,

    /// IP address / interface to bind to.
    pub bind_addr: String,

    /// HTTP port to listen on.
    pub port: u16,

    /// Pause after each committed match, in milliseconds (0 = off).
    /// Debug aid for watching the book drain slowly.
    pub match_throttle_ms: u64,
}

impl Config {
    /// Construct a `Config` from environment variables, falling back
    /// to defaults.
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Config {
            symbol: env::var("EXCHANGE_SYMBOL").unwrap_or_else(|_| "BTC_USDT".to_string()),
            price_digits: read_env_or_default("EXCHANGE_PRICE_DIGITS", 2u32)?,
            quantity_digits: read_env_or_default("EXCHANGE_QUANTITY_DIGITS", 4u32)?,
            bind_addr: env::var("EXCHANGE_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: read_env_or_default("EXCHANGE_PORT", 8080u16)?,
            match_throttle_ms: read_env_or_default("EXCHANGE_MATCH_THROTTLE_MS", 0u64)?,
        })
    }

    /// Convenience: `addr:port` socket string.
    pub fn socket_addr_string(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    pub fn match_throttle(&self) -> Option<Duration> {
        (self.match_throttle_ms > 0).then(|| Duration::from_millis(self.match_throttle_ms))
    }
}

fn read_env_or_default<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(val) => val
            .parse::<T>()
            .with_context(|| format!("invalid value for {key}")),
        Err(_) => Ok(default),
    }
}
