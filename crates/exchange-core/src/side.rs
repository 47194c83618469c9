//! Side (Buy / Sell) for orders and depth tables.

/// Order side: Buy (bid) or Sell (ask).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// Prefix that makes order ids self-describing: `b-` for bids,
    /// `a-` for asks.
    pub fn id_prefix(self) -> &'static str {
        match self {
            Side::Buy => "b-",
            Side::Sell => "a-",
        }
    }

    /// Lower-case wire name (`"bid"` / `"ask"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Side::Buy => "bid",
            Side::Sell => "ask",
        }
    }

    /// Parse from the wire name. `"ask"` is the sell side, anything
    /// else is treated as a bid.
    pub fn from_order_type(s: &str) -> Self {
        if s.eq_ignore_ascii_case("ask") {
            Side::Sell
        } else {
            Side::Buy
        }
    }
}
