//! Trade result record.

use rust_decimal::Decimal;

use crate::order::Order;

/// Immutable record of one matching event.
///
/// Produced exactly once per committed match, in commit order, and
/// delivered over a bounded channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeResult {
    pub symbol: String,
    pub ask_order_id: String,
    pub bid_order_id: String,
    pub trade_quantity: Decimal,
    pub trade_price: Decimal,
    /// `trade_quantity * trade_price`, computed in exact decimal.
    pub trade_amount: Decimal,
    /// Nanoseconds since the Unix epoch.
    pub trade_time: i64,
}

impl TradeResult {
    pub fn new(
        symbol: impl Into<String>,
        ask_order_id: impl Into<String>,
        bid_order_id: impl Into<String>,
        trade_quantity: Decimal,
        trade_price: Decimal,
    ) -> Self {
        TradeResult {
            symbol: symbol.into(),
            ask_order_id: ask_order_id.into(),
            bid_order_id: bid_order_id.into(),
            trade_quantity,
            trade_price,
            trade_amount: trade_quantity * trade_price,
            trade_time: Order::current_timestamp_ns(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn amount_is_quantity_times_price() {
        let trade = TradeResult::new("BTC_USDT", "a-1", "b-1", dec!(3), dec!(100.5));
        assert_eq!(trade.trade_amount, dec!(301.5));
    }
}
