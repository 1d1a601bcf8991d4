mod catalog;
mod error;
mod handlers;
mod models;
mod router;
mod state;

use std::net::SocketAddr;

use matching_engine::{MatchingEngine, OrderBook};
use tokio::net::TcpListener;
use tokio::signal;
use tracing_subscriber::EnvFilter;

use catalog::InstrumentCatalog;
use router::create_router;
use state::AppState;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let port = env_u16("GATEWAY_PORT", 8080);
    let instruments_path = env_string("INSTRUMENTS_FILE", "config/instruments.json");

    let catalog = InstrumentCatalog::load_from_file(&instruments_path)?;
    tracing::info!(count = catalog.len(), path = %instruments_path, "loaded instrument catalog");

    let engine = MatchingEngine::new();
    for symbol in catalog.symbols() {
        let mut book = OrderBook::new();
        let trade_symbol = symbol.clone();
        book.set_trade_observer(move |trade| {
            tracing::debug!(
                symbol = %trade_symbol,
                taker = %trade.taker_order_id,
                maker = %trade.maker_order_id,
                price = %trade.price,
                qty = %trade.qty,
                "trade executed"
            );
        });
        tracing::info!(%symbol, "registered order book");
        engine.register_book(symbol, book);
    }

    let state = AppState::new(engine, catalog);
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

/// Resolve on SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    tracing::info!("shutdown signal received");
}

fn env_string(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_u16(key: &str, default: u16) -> u16 {
    std::env::var(key)
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(default)
}
