// =============================================================================
// Application State — shared by every request handler
// =============================================================================
//
// Holds the immutable catalog, the market-data provider and the watchlist
// store. Only the store carries mutable state; it manages its own locking.
// Handlers receive the whole thing as `State<Arc<AppState<P>>>`.
// =============================================================================

use std::sync::Arc;

use crate::catalog::MarketCatalog;
use crate::provider::MarketDataProvider;
use crate::watchlist::WatchlistStore;

/// Central application state shared across all handlers via `Arc<AppState>`.
pub struct AppState<P: MarketDataProvider> {
    pub catalog: MarketCatalog,
    pub provider: P,
    pub watchlists: Arc<dyn WatchlistStore>,

    /// Instant when the service was started. Used for uptime reporting.
    pub start_time: std::time::Instant,
}

impl<P: MarketDataProvider> AppState<P> {
    pub fn new(catalog: MarketCatalog, provider: P, watchlists: Arc<dyn WatchlistStore>) -> Self {
        Self {
            catalog,
            provider,
            watchlists,
            start_time: std::time::Instant::now(),
        }
    }

    /// Seconds since the service started.
    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
