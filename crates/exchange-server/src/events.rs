//! Bridges engine events onto the WebSocket feed and the trade log.

use std::time::Duration;

use exchange_core::{format_fixed, EngineEvents, TradeResult};
use serde_json::json;
use tracing::info;

use crate::models::TradeView;
use crate::state::{AppState, RECENT_TRADE_LIMIT};

/// Interval between depth broadcasts on the WebSocket feed.
const DEPTH_PUSH_INTERVAL: Duration = Duration::from_millis(150);

/// Drain the engine's trade and cancel channels for the lifetime of
/// the process.
pub async fn watch_engine_events(state: AppState, mut events: EngineEvents) {
    loop {
        tokio::select! {
            maybe_trade = events.trades.recv() => match maybe_trade {
                Some(trade) => handle_trade(&state, trade).await,
                None => break,
            },
            maybe_cancel = events.cancels.recv() => match maybe_cancel {
                Some(order_id) => {
                    state.broadcast("cancel_order", json!({ "OrderId": order_id }));
                }
                None => break,
            },
        }
    }
    info!("engine event watcher stopped, channels closed");
}

async fn handle_trade(state: &AppState, trade: TradeResult) {
    let pair = &state.pair;
    let view = TradeView {
        trade_price: format_fixed(trade.trade_price, pair.price_digits()),
        trade_amount: format_fixed(trade.trade_amount, pair.price_digits()),
        trade_quantity: format_fixed(trade.trade_quantity, pair.quantity_digits()),
        trade_time: trade.trade_time,
        ask_order_id: trade.ask_order_id,
        bid_order_id: trade.bid_order_id,
    };

    state.broadcast("trade", serde_json::to_value(&view).unwrap_or_default());
    state.broadcast("latest_price", json!({ "latest_price": view.trade_price.clone() }));

    let mut recent = state.recent_trades.write().await;
    if recent.len() >= RECENT_TRADE_LIMIT {
        recent.pop_front();
    }
    recent.push_back(view);
}

/// Periodically broadcast the top 10 depth levels per side.
pub async fn push_depth(state: AppState) {
    let mut ticker = tokio::time::interval(DEPTH_PUSH_INTERVAL);
    loop {
        ticker.tick().await;
        let ask = state.pair.ask_depth(10).await;
        let bid = state.pair.bid_depth(10).await;
        state.broadcast("depth", json!({ "ask": ask, "bid": bid }));
    }
}
