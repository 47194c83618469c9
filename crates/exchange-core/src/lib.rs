//! exchange-core
//!
//! Pure matching logic for a single-instrument limit-order exchange:
//! - order / trade value types with exact decimal prices and quantities
//! - per-side priority order store (price-time FIFO)
//! - order book (priority store + identity index for cancels)
//! - continuous matching loop over one trade pair
//! - periodic depth aggregation
//!
//! No networking and no wire formats live here; adapters submit orders
//! and drain trade/cancel events through channels.

pub mod decimal;
pub mod depth;
pub mod error;
pub mod order;
pub mod order_book;
pub mod order_queue;
pub mod price_type;
pub mod side;
pub mod trade;
pub mod trade_pair;

pub use decimal::format_fixed;
pub use error::EngineError;
pub use order::Order;
pub use order_book::OrderBook;
pub use order_queue::{OrderQueue, PriorityKey};
pub use price_type::PriceType;
pub use side::Side;
pub use trade::TradeResult;
pub use trade_pair::{EngineEvents, TradePair};
