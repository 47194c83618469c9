//! exchange-server
//!
//! HTTP/WebSocket adapter over the matching core: order entry,
//! cancellation, depth and trade-log queries, and a market-data feed.

pub mod config;
pub mod models;
pub mod server;
pub mod state;

// internal modules, not re-exported
mod events;
mod handlers;
