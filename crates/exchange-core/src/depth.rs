//! Periodic depth aggregation.
//!
//! One ticker task per side collapses that side's book into
//! (priceString, aggregateQuantityString) levels: ascending by price
//! for asks, descending for bids. The table is rebuilt wholesale on
//! every refresh, never patched incrementally, so readers always see
//! an internally consistent snapshot.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;

use crate::decimal::format_fixed;
use crate::side::Side;
use crate::trade_pair::TradePair;

/// Snapshot refresh period.
pub const DEPTH_REFRESH_INTERVAL: Duration = Duration::from_millis(50);

/// Long-lived per-side refresh task.
pub async fn run_ticker(pair: Arc<TradePair>, side: Side) {
    let mut ticker = tokio::time::interval(DEPTH_REFRESH_INTERVAL);
    loop {
        ticker.tick().await;
        pair.refresh_depth(side).await;
    }
}

impl TradePair {
    /// Rebuild the depth table for one side from the live book.
    ///
    /// Orders are bucketed by their price rounded to the instrument's
    /// price-digit scale; quantities at a level are summed in exact
    /// decimal before formatting. The keying `BTreeMap` sorts levels by
    /// numeric price, so "9.50" lands before "10.00".
    pub async fn refresh_depth(&self, side: Side) {
        let price_digits = self.price_digits();
        let quantity_digits = self.quantity_digits();

        let table = self
            .with_book(side, |book| {
                let mut levels: BTreeMap<Decimal, Decimal> = BTreeMap::new();
                for order in book.iter() {
                    let level = order.price.round_dp(price_digits);
                    *levels.entry(level).or_insert(Decimal::ZERO) += order.quantity;
                }

                let row = |(price, qty): (&Decimal, &Decimal)| {
                    [
                        format_fixed(*price, price_digits),
                        format_fixed(*qty, quantity_digits),
                    ]
                };
                match side {
                    Side::Sell => levels.iter().map(row).collect::<Vec<_>>(),
                    Side::Buy => levels.iter().rev().map(row).collect::<Vec<_>>(),
                }
            })
            .await;

        let slot = match side {
            Side::Sell => &self.ask_depth,
            Side::Buy => &self.bid_depth,
        };
        *slot.write().await = table;
    }

    /// Up to `size` best ask levels from the latest snapshot.
    /// `size == 0` or oversized requests return the whole table.
    pub async fn ask_depth(&self, size: usize) -> Vec<[String; 2]> {
        clamped(&self.ask_depth.read().await, size)
    }

    /// Up to `size` best bid levels from the latest snapshot.
    pub async fn bid_depth(&self, size: usize) -> Vec<[String; 2]> {
        clamped(&self.bid_depth.read().await, size)
    }
}

fn clamped(table: &[[String; 2]], size: usize) -> Vec<[String; 2]> {
    let n = if size == 0 || size > table.len() {
        table.len()
    } else {
        size
    };
    table[..n].to_vec()
}
