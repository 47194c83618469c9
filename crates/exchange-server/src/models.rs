//! Wire DTOs for the HTTP API and the WebSocket feed.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/new_order`. Decimal fields travel as strings to
/// avoid any floating-point round trip.
#[derive(Debug, Deserialize)]
pub struct NewOrderRequest {
    /// `"ask"` or `"bid"`.
    pub order_type: String,
    pub price: String,
    pub quantity: String,
    #[serde(default)]
    pub amount: Option<String>,
}

/// Body of `POST /api/cancel_order`.
#[derive(Debug, Deserialize)]
pub struct CancelOrderRequest {
    pub order_id: String,
}

/// Query string of `GET /api/depth`.
#[derive(Debug, Deserialize)]
pub struct DepthQuery {
    pub limit: Option<i64>,
}

/// One trade as exposed on the wire: decimals rendered at the
/// instrument's configured precision.
#[derive(Debug, Clone, Serialize)]
pub struct TradeView {
    #[serde(rename = "TradePrice")]
    pub trade_price: String,
    #[serde(rename = "TradeAmount")]
    pub trade_amount: String,
    #[serde(rename = "TradeQuantity")]
    pub trade_quantity: String,
    #[serde(rename = "TradeTime")]
    pub trade_time: i64,
    #[serde(rename = "AskOrderId")]
    pub ask_order_id: String,
    #[serde(rename = "BidOrderId")]
    pub bid_order_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_order_request_parses_without_amount() {
        let req: NewOrderRequest = serde_json::from_str(
            r#"{"order_type":"ask","price":"100.5","quantity":"3"}"#,
        )
        .unwrap();
        assert_eq!(req.order_type, "ask");
        assert_eq!(req.price, "100.5");
        assert!(req.amount.is_none());
    }

    #[test]
    fn trade_view_uses_wire_field_names() {
        let view = TradeView {
            trade_price: "100.00".into(),
            trade_amount: "300.00".into(),
            trade_quantity: "3.0000".into(),
            trade_time: 42,
            ask_order_id: "a-1".into(),
            bid_order_id: "b-1".into(),
        };
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["TradePrice"], "100.00");
        assert_eq!(json["AskOrderId"], "a-1");
    }
}
