//! Price type of an order.
//!
//! Only `Limit` is handled by the matching loop today. The market
//! variants are accepted on the inbound stream but never booked; they
//! are kept declared so the wire surface stays stable while market
//! order matching is pending product clarification.

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PriceType {
    Limit,
    Market,
    /// Market order sized by quantity.
    MarketQuantity,
    /// Market order sized by total amount (quote currency).
    MarketAmount,
}
