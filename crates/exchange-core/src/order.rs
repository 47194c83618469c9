//! Order representation used inside the books.

use std::time::{SystemTime, UNIX_EPOCH};

use rust_decimal::Decimal;

use crate::error::EngineError;
use crate::price_type::PriceType;
use crate::side::Side;

/// Absolute ceiling on order price and quantity.
pub const PRICE_QTY_CEILING: u64 = 100_000_000;

/// A single order.
///
/// `quantity` is the only field mutated after construction: the
/// matching loop decrements it on each fill, monotonically toward zero.
/// `amount` is reserved for market-by-amount orders and is unused by
/// limit matching. `create_time` is a monotonic nanosecond instant used
/// only as the price-time tie-break.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub id: String,
    pub side: Side,
    pub price_type: PriceType,
    pub price: Decimal,
    pub quantity: Decimal,
    pub amount: Decimal,
    pub create_time: i64,
}

impl Order {
    /// Construct an order without validation. Prefer [`Order::limit`]
    /// for anything coming from the outside.
    pub fn new(
        side: Side,
        price_type: PriceType,
        id: impl Into<String>,
        price: Decimal,
        quantity: Decimal,
        amount: Decimal,
        create_time: i64,
    ) -> Self {
        Order {
            id: id.into(),
            side,
            price_type,
            price,
            quantity,
            amount,
            create_time,
        }
    }

    /// Construct a validated limit order.
    pub fn limit(
        side: Side,
        id: impl Into<String>,
        price: Decimal,
        quantity: Decimal,
        create_time: i64,
    ) -> Result<Self, EngineError> {
        Self::validate(price, quantity)?;
        Ok(Self::new(
            side,
            PriceType::Limit,
            id,
            price,
            quantity,
            Decimal::ZERO,
            create_time,
        ))
    }

    /// Reject out-of-range price or quantity before it can reach a book.
    pub fn validate(price: Decimal, quantity: Decimal) -> Result<(), EngineError> {
        let ceiling = Decimal::from(PRICE_QTY_CEILING);
        if price <= Decimal::ZERO || price >= ceiling {
            return Err(EngineError::InvalidPrice(price));
        }
        if quantity <= Decimal::ZERO || quantity >= ceiling {
            return Err(EngineError::InvalidQuantity(quantity));
        }
        Ok(())
    }

    /// `true` once the order has been fully filled.
    pub fn is_filled(&self) -> bool {
        self.quantity.is_zero()
    }

    /// Current time in nanoseconds since the Unix epoch.
    pub fn current_timestamp_ns() -> i64 {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        (now.as_secs() as i64)
            .saturating_mul(1_000_000_000)
            .saturating_add(now.subsec_nanos() as i64)
    }
}
