//! Router construction and top-level server wiring.
//!
//! `run` spawns the matching engine for the configured instrument, the
//! event watcher and the depth broadcaster, then serves the HTTP API.

use axum::routing::{get, post};
use axum::Router;
use exchange_core::TradePair;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::state::AppState;
use crate::{events, handlers};

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/new_order", post(handlers::new_order))
        .route("/api/cancel_order", post(handlers::cancel_order))
        .route("/api/depth", get(handlers::depth))
        .route("/api/trade_log", get(handlers::trade_log))
        .route("/ws", get(handlers::ws))
        .route("/pong", get(handlers::pong))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the HTTP server with the given configuration.
pub async fn run(config: Config) -> anyhow::Result<()> {
    let (pair, engine_events) = TradePair::spawn(
        config.symbol.clone(),
        config.price_digits,
        config.quantity_digits,
        config.match_throttle(),
    );

    let state = AppState::new(pair);
    tokio::spawn(events::watch_engine_events(state.clone(), engine_events));
    tokio::spawn(events::push_depth(state.clone()));

    let app = create_router(state);
    let addr = config.socket_addr_string();
    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, symbol = %config.symbol, "listening");

    axum::serve(listener, app).await?;
    Ok(())
}
