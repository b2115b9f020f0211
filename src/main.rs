// =============================================================================
// Market Chart Service — Main Entry Point
// =============================================================================
//
// Serves quotes, symbol search and candle charts with an RSI overlay (RSI,
// its moving average and Bollinger Bands around it) over a JSON API. Market
// data comes from the Yahoo Finance chart API; watchlists are kept in memory
// per client session.
// =============================================================================

// ── Module declarations ──────────────────────────────────────────────────────
mod api;
mod app_state;
mod assembly;
mod catalog;
mod error;
mod indicators;
mod provider;
mod runtime_config;
mod symbols;
mod timeframe;
mod types;
mod watchlist;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::app_state::AppState;
use crate::provider::YahooProvider;
use crate::runtime_config::{RuntimeConfig, DEFAULT_CONFIG_PATH};
use crate::watchlist::InMemoryWatchlistStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Environment & config ──────────────────────────────────────────
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Market Chart Service — starting up");

    let config_path =
        std::env::var("MARKET_CONFIG_PATH").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());
    let mut config = RuntimeConfig::load(&config_path).unwrap_or_else(|e| {
        warn!(error = %format!("{e:#}"), "Failed to load config, using defaults");
        RuntimeConfig::default()
    });
    config.apply_overrides(|key| std::env::var(key).ok());

    info!(
        bind_addr = %config.bind_addr,
        provider = %config.provider.base_url,
        popular = config.catalog.popular.us.len() + config.catalog.popular.indian.len(),
        max_sessions = config.sessions.max_sessions,
        "Configuration resolved"
    );

    // ── 2. Provider & shared state ───────────────────────────────────────
    let provider = YahooProvider::new(&config.provider)?;
    let state = Arc::new(AppState::new(
        config.catalog,
        provider,
        Arc::new(InMemoryWatchlistStore::with_limits(
            config.sessions.max_sessions,
            Duration::from_secs(config.sessions.ttl_secs),
        )),
    ));

    // ── 3. API server ────────────────────────────────────────────────────
    let app = api::rest::router(state);
    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind API server to {}", config.bind_addr))?;
    info!(addr = %config.bind_addr, "API server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("API server failed")?;

    info!("Market Chart Service shut down complete.");
    Ok(())
}

/// Resolves on Ctrl+C. If the signal handler cannot be installed the server
/// keeps running until killed.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    warn!("Shutdown signal received — stopping gracefully");
}
