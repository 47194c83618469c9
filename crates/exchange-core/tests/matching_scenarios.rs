// End-to-end matching scenarios over a single TradePair.

use std::time::Duration;

use exchange_core::{Order, Side, TradePair};
use rust_decimal_macros::dec;

fn ask(id: &str, price: rust_decimal::Decimal, qty: rust_decimal::Decimal, ts: i64) -> Order {
    Order::limit(Side::Sell, id, price, qty, ts).unwrap()
}

fn bid(id: &str, price: rust_decimal::Decimal, qty: rust_decimal::Decimal, ts: i64) -> Order {
    Order::limit(Side::Buy, id, price, qty, ts).unwrap()
}

#[tokio::test]
async fn partial_fill_leaves_ask_remainder() {
    let (pair, _order_rx, mut events) = TradePair::new("BTC_USDT", 2, 4, None);

    pair.place_order(ask("a-1", dec!(100), dec!(5), 1)).await;
    pair.place_order(bid("b-1", dec!(100), dec!(3), 2)).await;

    assert!(pair.match_once().await);

    let trade = events.trades.try_recv().expect("one trade expected");
    assert_eq!(trade.symbol, "BTC_USDT");
    assert_eq!(trade.ask_order_id, "a-1");
    assert_eq!(trade.bid_order_id, "b-1");
    assert_eq!(trade.trade_quantity, dec!(3));
    // The ask arrived first and sets the price.
    assert_eq!(trade.trade_price, dec!(100));
    assert_eq!(trade.trade_amount, dec!(300));

    // Bid fully filled and removed; ask rests with the remainder.
    assert_eq!(pair.ask_len().await, 1);
    assert_eq!(pair.bid_len().await, 0);
    let (best_bid, best_ask) = pair.best_prices().await;
    assert_eq!(best_bid, None);
    assert_eq!(best_ask, Some(dec!(100)));

    // Nothing left to cross.
    assert!(!pair.match_once().await);
}

#[tokio::test]
async fn earlier_resting_order_sets_the_price() {
    let (pair, _order_rx, mut events) = TradePair::new("BTC_USDT", 2, 4, None);

    // Bid arrives first at 101, ask crosses at 99.
    pair.place_order(bid("b-1", dec!(101), dec!(2), 1)).await;
    pair.place_order(ask("a-1", dec!(99), dec!(2), 2)).await;

    assert!(pair.match_once().await);

    let trade = events.trades.try_recv().expect("one trade expected");
    assert_eq!(trade.trade_quantity, dec!(2));
    assert_eq!(trade.trade_price, dec!(101));

    assert_eq!(pair.ask_len().await, 0);
    assert_eq!(pair.bid_len().await, 0);
    assert_eq!(pair.latest_price().await, dec!(101));
}

#[tokio::test]
async fn no_trade_while_spread_is_positive() {
    let (pair, _order_rx, mut events) = TradePair::new("BTC_USDT", 2, 4, None);

    pair.place_order(ask("a-1", dec!(100), dec!(1), 1)).await;
    pair.place_order(bid("b-1", dec!(99.99), dec!(1), 2)).await;

    assert!(!pair.match_once().await);
    assert!(events.trades.try_recv().is_err());
    assert_eq!(pair.ask_len().await, 1);
    assert_eq!(pair.bid_len().await, 1);
}

#[tokio::test]
async fn empty_side_is_a_normal_no_match() {
    let (pair, _order_rx, _events) = TradePair::new("BTC_USDT", 2, 4, None);

    assert!(!pair.match_once().await);
    pair.place_order(ask("a-1", dec!(100), dec!(1), 1)).await;
    assert!(!pair.match_once().await);
}

#[tokio::test]
async fn equal_quantities_empty_both_books() {
    let (pair, _order_rx, mut events) = TradePair::new("BTC_USDT", 2, 4, None);

    pair.place_order(ask("a-1", dec!(50), dec!(4), 1)).await;
    pair.place_order(bid("b-1", dec!(50), dec!(4), 2)).await;

    assert!(pair.match_once().await);
    let trade = events.trades.try_recv().unwrap();
    assert_eq!(trade.trade_quantity, dec!(4));
    assert_eq!(pair.ask_len().await, 0);
    assert_eq!(pair.bid_len().await, 0);
}

#[tokio::test]
async fn fills_walk_down_the_price_priority() {
    let (pair, _order_rx, mut events) = TradePair::new("BTC_USDT", 2, 4, None);

    pair.place_order(ask("a-cheap", dec!(99), dec!(1), 1)).await;
    pair.place_order(ask("a-dear", dec!(100), dec!(1), 2)).await;
    pair.place_order(bid("b-1", dec!(100), dec!(2), 3)).await;

    // First match consumes the cheaper ask.
    assert!(pair.match_once().await);
    let first = events.trades.try_recv().unwrap();
    assert_eq!(first.ask_order_id, "a-cheap");
    assert_eq!(first.trade_price, dec!(99));

    // Second match hits the remaining ask at its own price.
    assert!(pair.match_once().await);
    let second = events.trades.try_recv().unwrap();
    assert_eq!(second.ask_order_id, "a-dear");
    assert_eq!(second.trade_price, dec!(100));

    assert_eq!(pair.ask_len().await, 0);
    assert_eq!(pair.bid_len().await, 0);
}

#[tokio::test]
async fn cancel_after_partial_fill() {
    let (pair, _order_rx, mut events) = TradePair::new("BTC_USDT", 2, 4, None);

    pair.place_order(ask("a-1", dec!(100), dec!(5), 1)).await;
    pair.place_order(bid("b-1", dec!(100), dec!(3), 2)).await;
    assert!(pair.match_once().await);
    let _ = events.trades.try_recv().unwrap();

    // The ask still rests with quantity 2; cancel removes it.
    assert!(pair.cancel_order("a-1").await);
    assert_eq!(events.cancels.try_recv().unwrap(), "a-1");
    assert_eq!(pair.ask_len().await, 0);

    // Second cancel of the same id is a no-op not-found.
    assert!(!pair.cancel_order("a-1").await);
    assert!(events.cancels.try_recv().is_err());
}

#[tokio::test]
async fn cancel_of_unknown_id_reports_not_found() {
    let (pair, _order_rx, _events) = TradePair::new("BTC_USDT", 2, 4, None);
    assert!(!pair.cancel_order("a-missing").await);
}

#[tokio::test]
async fn duplicate_submission_is_idempotent() {
    let (pair, _order_rx, _events) = TradePair::new("BTC_USDT", 2, 4, None);

    pair.place_order(ask("a-1", dec!(100), dec!(5), 1)).await;
    pair.place_order(ask("a-1", dec!(90), dec!(9), 2)).await;

    assert_eq!(pair.ask_len().await, 1);
    let (_, best_ask) = pair.best_prices().await;
    assert_eq!(best_ask, Some(dec!(100)));
}

#[tokio::test]
async fn spawned_loop_matches_submitted_orders() {
    let (pair, mut events) = TradePair::spawn("BTC_USDT", 2, 4, None);

    pair.submit(ask("a-1", dec!(100), dec!(5), 1)).await.unwrap();
    pair.submit(bid("b-1", dec!(100), dec!(3), 2)).await.unwrap();

    let trade = tokio::time::timeout(Duration::from_secs(2), events.trades.recv())
        .await
        .expect("trade within 2s")
        .expect("trade channel open");

    assert_eq!(trade.trade_quantity, dec!(3));
    assert_eq!(trade.trade_price, dec!(100));
    assert_eq!(pair.ask_len().await, 1);
    assert_eq!(pair.bid_len().await, 0);
}

#[tokio::test]
async fn depth_omits_fully_filled_orders() {
    let (pair, _order_rx, mut events) = TradePair::new("BTC_USDT", 2, 4, None);

    pair.place_order(ask("a-1", dec!(100), dec!(3), 1)).await;
    pair.place_order(bid("b-1", dec!(100), dec!(3), 2)).await;
    assert!(pair.match_once().await);
    let _ = events.trades.try_recv().unwrap();

    pair.refresh_depth(Side::Sell).await;
    pair.refresh_depth(Side::Buy).await;
    assert!(pair.ask_depth(0).await.is_empty());
    assert!(pair.bid_depth(0).await.is_empty());
}
