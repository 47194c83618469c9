//! Shared application state.

use std::collections::VecDeque;
use std::sync::Arc;

use exchange_core::TradePair;
use tokio::sync::{broadcast, RwLock};

use crate::models::TradeView;

/// How many recent trades the trade-log endpoint retains.
pub const RECENT_TRADE_LIMIT: usize = 10;

/// Capacity of the WebSocket broadcast feed. Slow clients that fall
/// further behind than this skip messages instead of blocking the
/// engine watchers.
const FEED_CAPACITY: usize = 100;

#[derive(Clone)]
pub struct AppState {
    pub pair: Arc<TradePair>,
    pub recent_trades: Arc<RwLock<VecDeque<TradeView>>>,
    pub feed: broadcast::Sender<String>,
}

impl AppState {
    pub fn new(pair: Arc<TradePair>) -> Self {
        let (feed, _) = broadcast::channel(FEED_CAPACITY);
        AppState {
            pair,
            recent_trades: Arc::new(RwLock::new(VecDeque::with_capacity(RECENT_TRADE_LIMIT))),
            feed,
        }
    }

    /// Publish a tagged message on the WebSocket feed. Having no
    /// subscriber is not an error.
    pub fn broadcast(&self, tag: &str, data: serde_json::Value) {
        let msg = serde_json::json!({ "tag": tag, "data": data });
        let _ = self.feed.send(msg.to_string());
    }
}
