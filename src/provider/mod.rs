// =============================================================================
// Market Data Provider — the external collaborator behind every request
// =============================================================================
//
// The core never talks HTTP itself. It asks a `MarketDataProvider` for:
//   (a) an ordered OHLCV series for (symbol, interval, lookback), and
//   (b) descriptive metadata for a symbol.
//
// "No data" is a successful, empty answer (`Ok(vec![])` / `Ok(None)`);
// transport and decoding failures are `Err`. Callers decide how to degrade.
// =============================================================================

use std::future::Future;

use anyhow::Result;

use crate::types::{PriceBar, SymbolMetadata};

pub mod yahoo;

#[cfg(test)]
pub mod mock;

pub use yahoo::YahooProvider;

/// Source of bars and symbol metadata. Symbols passed in are already
/// normalised.
pub trait MarketDataProvider: Send + Sync + 'static {
    /// Ordered (ascending timestamp) bars; empty when the provider has none.
    fn fetch_bars(
        &self,
        symbol: &str,
        interval: &str,
        lookback: &str,
    ) -> impl Future<Output = Result<Vec<PriceBar>>> + Send;

    /// Metadata for `symbol`; `None` when the provider does not know it.
    fn fetch_metadata(
        &self,
        symbol: &str,
    ) -> impl Future<Output = Result<Option<SymbolMetadata>>> + Send;
}
