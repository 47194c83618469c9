//! One side of the book: priority store plus identity index.
//!
//! The identity index (`id -> PriorityKey`) supports O(log n)
//! cancel-by-id alongside the priority structure. Every mutation
//! touches both structures together; an order present in one is
//! present in the other.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::order::Order;
use crate::order_queue::{OrderQueue, PriorityKey};
use crate::side::Side;

#[derive(Debug)]
pub struct OrderBook {
    queue: OrderQueue,
    index: HashMap<String, PriorityKey>,
}

impl OrderBook {
    pub fn new(side: Side) -> Self {
        OrderBook {
            queue: OrderQueue::new(side),
            index: HashMap::new(),
        }
    }

    pub fn side(&self) -> Side {
        self.queue.side()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Add a resting order. Duplicate submission is idempotent:
    /// returns `true` and leaves the book unchanged when the id is
    /// already present.
    pub fn push(&mut self, order: Order) -> bool {
        if self.index.contains_key(&order.id) {
            return true;
        }
        let key = PriorityKey::for_order(&order);
        self.index.insert(order.id.clone(), key.clone());
        self.queue.insert(key, order);
        false
    }

    /// Remove an order by id, e.g. on cancellation.
    pub fn remove(&mut self, id: &str) -> Option<Order> {
        let key = self.index.remove(id)?;
        let order = self.queue.remove(&key);
        debug_assert!(
            order.is_some(),
            "identity index points at a missing store entry"
        );
        order
    }

    /// The current best order, without removing it.
    pub fn top(&self) -> Option<&Order> {
        self.queue.peek_best()
    }

    /// Decrement a resting order's quantity by `qty`; the order is
    /// removed from both structures in the same step when it reaches
    /// exactly zero. Returns the remaining quantity, or `None` when the
    /// id is unknown.
    pub fn fill(&mut self, id: &str, qty: Decimal) -> Option<Decimal> {
        let key = self.index.get(id)?.clone();
        let remaining = {
            let order = self.queue.get_mut(&key)?;
            order.quantity = (order.quantity - qty).max(Decimal::ZERO);
            order.quantity
        };
        if remaining.is_zero() {
            self.queue.remove(&key);
            self.index.remove(id);
        }
        Some(remaining)
    }

    /// Reset both structures atomically.
    pub fn clear(&mut self) {
        self.queue.clear();
        self.index.clear();
    }

    /// Iterate resting orders in priority order (best first).
    pub fn iter(&self) -> impl Iterator<Item = &Order> {
        self.queue.iter()
    }

    /// Structural agreement between the identity index and the store.
    pub fn is_consistent(&self) -> bool {
        self.queue.len() == self.index.len()
    }
}
