//! Error types for the matching core.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors surfaced by the matching core.
///
/// Validation failures are reported synchronously to the submitter and
/// never reach the matching loop. `Internal` marks an invariant
/// violation (identity index / priority store divergence) which is
/// answered with a full book reset.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("price must be > 0 and < 100000000, got {0}")]
    InvalidPrice(Decimal),

    #[error("quantity must be > 0 and < 100000000, got {0}")]
    InvalidQuantity(Decimal),

    #[error("matching engine is shut down")]
    Closed,

    #[error("internal invariant violation: {0}")]
    Internal(String),
}
