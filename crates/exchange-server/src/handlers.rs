//! HTTP and WebSocket handlers.

use std::str::FromStr;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::response::Response;
use axum::Json;
use futures_util::StreamExt;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use tracing::warn;
use uuid::Uuid;

use exchange_core::{Order, Side};

use crate::models::{CancelOrderRequest, DepthQuery, NewOrderRequest};
use crate::state::AppState;

fn rejected(error: impl ToString) -> Json<Value> {
    Json(json!({ "ok": false, "error": error.to_string() }))
}

/// `POST /api/new_order`: validate, assign the side-prefixed id and
/// timestamp, and queue the order for the matching task.
pub async fn new_order(
    State(state): State<AppState>,
    Json(req): Json<NewOrderRequest>,
) -> Json<Value> {
    let side = Side::from_order_type(&req.order_type);

    let price = match Decimal::from_str(req.price.trim()) {
        Ok(price) => price,
        Err(_) => return rejected("price must be a decimal number"),
    };
    let quantity = match Decimal::from_str(req.quantity.trim()) {
        Ok(quantity) => quantity,
        Err(_) => return rejected("quantity must be a decimal number"),
    };

    let order_id = format!("{}{}", side.id_prefix(), Uuid::new_v4());
    let order = match Order::limit(
        side,
        order_id.clone(),
        price,
        quantity,
        Order::current_timestamp_ns(),
    ) {
        Ok(order) => order,
        Err(err) => return rejected(err),
    };

    if state.pair.submit(order).await.is_err() {
        return rejected("matching engine unavailable");
    }

    state.broadcast(
        "new_order",
        json!({
            "order_id": order_id,
            "order_type": side.as_str(),
            "price": req.price,
            "quantity": req.quantity,
        }),
    );

    Json(json!({
        "ok": true,
        "data": {
            "order_id": order_id,
            "ask_len": state.pair.ask_len().await,
            "bid_len": state.pair.bid_len().await,
        }
    }))
}

/// `POST /api/cancel_order`: best-effort synchronous removal; an
/// unknown id is a negative acknowledgement, not an error.
pub async fn cancel_order(
    State(state): State<AppState>,
    Json(req): Json<CancelOrderRequest>,
) -> Json<Value> {
    if req.order_id.is_empty() {
        return rejected("order_id is required");
    }

    let found = state.pair.cancel_order(&req.order_id).await;
    Json(json!({ "ok": true, "data": { "found": found } }))
}

/// `GET /api/depth?limit=N`: latest depth snapshot, default 10 levels,
/// capped at 100.
pub async fn depth(State(state): State<AppState>, Query(query): Query<DepthQuery>) -> Json<Value> {
    let limit = match query.limit {
        Some(l) if (1..=100).contains(&l) => l as usize,
        _ => 10,
    };

    let ask = state.pair.ask_depth(limit).await;
    let bid = state.pair.bid_depth(limit).await;
    Json(json!({ "ask": ask, "bid": bid }))
}

/// `GET /api/trade_log`: the most recent trades, oldest first.
pub async fn trade_log(State(state): State<AppState>) -> Json<Value> {
    let trades: Vec<_> = state.recent_trades.read().await.iter().cloned().collect();
    Json(json!({ "ok": true, "data": { "trade_log": trades } }))
}

/// `GET /pong`: liveness probe.
pub async fn pong() -> Json<Value> {
    Json(json!({ "message": "pong" }))
}

/// `GET /ws`: subscribe to the market-data feed.
pub async fn ws(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(mut socket: WebSocket, state: AppState) {
    let mut feed = state.feed.subscribe();

    loop {
        tokio::select! {
            msg = feed.recv() => match msg {
                Ok(text) => {
                    if socket.send(Message::Text(text)).await.is_err() {
                        break;
                    }
                }
                Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "websocket client lagging, feed messages dropped");
                }
                Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
            },
            incoming = socket.next() => match incoming {
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {} // the feed is one-way; ignore client messages
                Some(Err(_)) => break,
            },
        }
    }
}
