//! Matching engine for one instrument.
//!
//! A [`TradePair`] owns the bid and ask books behind one exclusive
//! lock, drains an inbound order channel, runs the continuous matching
//! loop and emits trade/cancel events over bounded channels. All book
//! mutation (intake, fills, cancels) is serialized behind that single
//! lock, so a match reads and writes both books atomically with respect
//! to any concurrent push.

use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, error, info};

use crate::depth;
use crate::error::EngineError;
use crate::order::Order;
use crate::order_book::OrderBook;
use crate::price_type::PriceType;
use crate::side::Side;
use crate::trade::TradeResult;

/// Pause between match attempts while the books are empty or the
/// spread is still positive. The wait ends early when a new order
/// arrives, so intake latency is not bounded by it.
const IDLE_BACKOFF: Duration = Duration::from_millis(60);

/// Capacity of the inbound order channel.
const ORDER_CHANNEL_CAPACITY: usize = 16;

/// Capacity of the outbound trade and cancel channels. A slow consumer
/// eventually blocks the matching task (backpressure); committed
/// results are never dropped.
const EVENT_CHANNEL_CAPACITY: usize = 10;

/// Both books plus the aggregate counters they guard.
#[derive(Debug)]
struct Books {
    asks: OrderBook,
    bids: OrderBook,
    latest_price: Decimal,
}

/// Receiving halves of the outbound event channels, handed to the
/// transport layer at construction.
pub struct EngineEvents {
    pub trades: mpsc::Receiver<TradeResult>,
    pub cancels: mpsc::Receiver<String>,
}

/// Matching engine handle for a single instrument.
pub struct TradePair {
    symbol: String,
    price_digits: u32,
    quantity_digits: u32,
    /// Optional pause after each committed match (debug aid).
    match_throttle: Option<Duration>,

    books: Mutex<Books>,
    pub(crate) ask_depth: RwLock<Vec<[String; 2]>>,
    pub(crate) bid_depth: RwLock<Vec<[String; 2]>>,

    order_tx: mpsc::Sender<Order>,
    trade_tx: mpsc::Sender<TradeResult>,
    cancel_tx: mpsc::Sender<String>,
}

impl TradePair {
    /// Build a pair without spawning any task. Returns the handle, the
    /// inbound order receiver (to be passed to [`TradePair::run_matching`])
    /// and the outbound event receivers.
    pub fn new(
        symbol: impl Into<String>,
        price_digits: u32,
        quantity_digits: u32,
        match_throttle: Option<Duration>,
    ) -> (Arc<Self>, mpsc::Receiver<Order>, EngineEvents) {
        let (order_tx, order_rx) = mpsc::channel(ORDER_CHANNEL_CAPACITY);
        let (trade_tx, trade_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let (cancel_tx, cancel_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);

        let pair = Arc::new(TradePair {
            symbol: symbol.into(),
            price_digits,
            quantity_digits,
            match_throttle,
            books: Mutex::new(Books {
                asks: OrderBook::new(Side::Sell),
                bids: OrderBook::new(Side::Buy),
                latest_price: Decimal::ZERO,
            }),
            ask_depth: RwLock::new(Vec::new()),
            bid_depth: RwLock::new(Vec::new()),
            order_tx,
            trade_tx,
            cancel_tx,
        });

        let events = EngineEvents {
            trades: trade_rx,
            cancels: cancel_rx,
        };
        (pair, order_rx, events)
    }

    /// Build a pair and spawn its long-lived tasks: the matching loop
    /// and one depth-refresh ticker per side.
    pub fn spawn(
        symbol: impl Into<String>,
        price_digits: u32,
        quantity_digits: u32,
        match_throttle: Option<Duration>,
    ) -> (Arc<Self>, EngineEvents) {
        let (pair, order_rx, events) = Self::new(symbol, price_digits, quantity_digits, match_throttle);

        tokio::spawn(Arc::clone(&pair).run_matching(order_rx));
        tokio::spawn(depth::run_ticker(Arc::clone(&pair), Side::Sell));
        tokio::spawn(depth::run_ticker(Arc::clone(&pair), Side::Buy));

        (pair, events)
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn price_digits(&self) -> u32 {
        self.price_digits
    }

    pub fn quantity_digits(&self) -> u32 {
        self.quantity_digits
    }

    /// Queue an order for the matching task. Blocks when the inbound
    /// channel is full (backpressure).
    pub async fn submit(&self, order: Order) -> Result<(), EngineError> {
        self.order_tx
            .send(order)
            .await
            .map_err(|_| EngineError::Closed)
    }

    /// Apply a new order to the books immediately. The matching task
    /// calls this for each drained submission; embedders may call it
    /// directly when they already run on the engine's task.
    ///
    /// Only limit orders are booked; market price types are accepted
    /// but currently ignored here.
    pub async fn place_order(&self, order: Order) {
        if order.price_type != PriceType::Limit {
            debug!(
                symbol = %self.symbol,
                order_id = %order.id,
                price_type = ?order.price_type,
                "ignoring non-limit order"
            );
            return;
        }

        let order_id = order.id.clone();
        let mut books = self.books.lock().await;
        let book = match order.side {
            Side::Sell => &mut books.asks,
            Side::Buy => &mut books.bids,
        };
        if book.push(order) {
            debug!(symbol = %self.symbol, order_id = %order_id, "duplicate order id, push ignored");
        }
    }

    /// Attempt exactly one match between the two best resting orders.
    /// Returns `true` when a trade was committed and emitted.
    pub async fn match_once(&self) -> bool {
        let result = {
            let mut books = self.books.lock().await;

            let (ask, bid) = match (books.asks.top(), books.bids.top()) {
                (Some(ask), Some(bid)) => (ask.clone(), bid.clone()),
                _ => return false,
            };

            if bid.price < ask.price {
                // Spread still positive.
                return false;
            }

            let trade_qty = ask.quantity.min(bid.quantity);
            // The earlier-arriving resting order dictates the execution
            // price (it is the passive, price-setting side).
            let trade_price = if ask.create_time >= bid.create_time {
                bid.price
            } else {
                ask.price
            };

            let ask_left = books.asks.fill(&ask.id, trade_qty);
            let bid_left = books.bids.fill(&bid.id, trade_qty);
            if ask_left.is_none() || bid_left.is_none() {
                let err = EngineError::Internal(
                    "identity index diverged from priority store".to_string(),
                );
                error!(symbol = %self.symbol, %err, "resetting books");
                books.asks.clear();
                books.bids.clear();
                return false;
            }

            books.latest_price = trade_price;
            TradeResult::new(&self.symbol, &ask.id, &bid.id, trade_qty, trade_price)
        };

        debug!(
            symbol = %self.symbol,
            ask_order_id = %result.ask_order_id,
            bid_order_id = %result.bid_order_id,
            quantity = %result.trade_quantity,
            price = %result.trade_price,
            "trade committed"
        );

        // Emit after releasing the book lock; ordering is preserved
        // because matching is single-task per instrument.
        if self.trade_tx.send(result).await.is_err() {
            error!(symbol = %self.symbol, "trade sink closed, committed trade result lost");
        }
        true
    }

    /// Cancel a resting order by id. Looks in both books; emits a
    /// cancel event and returns `true` when found, returns `false`
    /// without side effects otherwise.
    pub async fn cancel_order(&self, order_id: &str) -> bool {
        let removed = {
            let mut books = self.books.lock().await;
            match books.asks.remove(order_id) {
                Some(order) => Some(order),
                None => books.bids.remove(order_id),
            }
        };

        match removed {
            Some(order) => {
                info!(symbol = %self.symbol, order_id = %order.id, "order cancelled");
                if self.cancel_tx.send(order.id).await.is_err() {
                    error!(symbol = %self.symbol, "cancel sink closed, cancel result lost");
                }
                true
            }
            None => false,
        }
    }

    /// Run the continuous matching loop. New-order intake and match
    /// attempts interleave on this one task: each iteration drains a
    /// pending submission if there is one, otherwise attempts a match,
    /// backing off with a timed wait (woken early by new orders) when
    /// the books don't cross.
    pub async fn run_matching(self: Arc<Self>, mut order_rx: mpsc::Receiver<Order>) {
        info!(symbol = %self.symbol, "matching loop started");

        loop {
            match order_rx.try_recv() {
                Ok(order) => {
                    self.place_order(order).await;
                    continue;
                }
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Disconnected) => break,
            }

            if self.match_once().await {
                if let Some(throttle) = self.match_throttle {
                    tokio::time::sleep(throttle).await;
                }
            } else {
                tokio::select! {
                    maybe_order = order_rx.recv() => match maybe_order {
                        Some(order) => self.place_order(order).await,
                        None => break,
                    },
                    _ = tokio::time::sleep(IDLE_BACKOFF) => {}
                }
            }
        }

        info!(symbol = %self.symbol, "matching loop stopped, order channel closed");
    }

    pub async fn ask_len(&self) -> usize {
        self.books.lock().await.asks.len()
    }

    pub async fn bid_len(&self) -> usize {
        self.books.lock().await.bids.len()
    }

    /// Price of the most recent trade (zero before the first match).
    pub async fn latest_price(&self) -> Decimal {
        self.books.lock().await.latest_price
    }

    /// Current best (bid, ask) prices.
    pub async fn best_prices(&self) -> (Option<Decimal>, Option<Decimal>) {
        let books = self.books.lock().await;
        (
            books.bids.top().map(|o| o.price),
            books.asks.top().map(|o| o.price),
        )
    }

    /// Snapshot one side's book under the pair lock. Used by the depth
    /// aggregator; `f` must not block.
    pub(crate) async fn with_book<T>(&self, side: Side, f: impl FnOnce(&OrderBook) -> T) -> T {
        let books = self.books.lock().await;
        match side {
            Side::Sell => f(&books.asks),
            Side::Buy => f(&books.bids),
        }
    }
}
