//! Priority order store: resting orders sorted by price-time priority.
//!
//! One store per book side. The ordering is the classic price-then-time
//! FIFO relation:
//! - asks: lower price first, earlier creation on ties,
//! - bids: higher price first, earlier creation on ties.
//!
//! The store is a `BTreeMap` keyed by a composite
//! (side-directed price, creation time, order id) sort key, so insert
//! and remove are O(log n) and the best order is the first entry.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::order::Order;
use crate::side::Side;

/// Composite sort key realizing the side-specific priority relation.
///
/// The order id is the final tie-break; it never decides priority
/// between distinct (price, time) pairs but makes the key a total
/// order so equal-priority orders can coexist in the tree.
#[derive(Debug, Clone)]
pub struct PriorityKey {
    side: Side,
    price: Decimal,
    create_time: i64,
    order_id: String,
}

impl PriorityKey {
    pub fn for_order(order: &Order) -> Self {
        PriorityKey {
            side: order.side,
            price: order.price,
            create_time: order.create_time,
            order_id: order.id.clone(),
        }
    }
}

impl Ord for PriorityKey {
    fn cmp(&self, other: &Self) -> Ordering {
        // Keys only ever meet inside one side's store.
        debug_assert_eq!(self.side, other.side);
        let by_price = match self.side {
            Side::Sell => self.price.cmp(&other.price),
            Side::Buy => other.price.cmp(&self.price),
        };
        by_price
            .then_with(|| self.create_time.cmp(&other.create_time))
            .then_with(|| self.order_id.cmp(&other.order_id))
    }
}

impl PartialOrd for PriorityKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for PriorityKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for PriorityKey {}

/// Sorted store of resting orders for one side.
#[derive(Debug)]
pub struct OrderQueue {
    side: Side,
    tree: BTreeMap<PriorityKey, Order>,
}

impl OrderQueue {
    pub fn new(side: Side) -> Self {
        OrderQueue {
            side,
            tree: BTreeMap::new(),
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    pub fn insert(&mut self, key: PriorityKey, order: Order) {
        self.tree.insert(key, order);
    }

    pub fn remove(&mut self, key: &PriorityKey) -> Option<Order> {
        self.tree.remove(key)
    }

    pub fn get_mut(&mut self, key: &PriorityKey) -> Option<&mut Order> {
        self.tree.get_mut(key)
    }

    /// The highest-priority resting order, without removing it.
    pub fn peek_best(&self) -> Option<&Order> {
        self.tree.values().next()
    }

    /// Iterate in priority order (best first).
    pub fn iter(&self) -> impl Iterator<Item = &Order> {
        self.tree.values()
    }

    pub fn clear(&mut self) {
        self.tree.clear();
    }
}
