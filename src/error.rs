// =============================================================================
// Error taxonomy for chart / quote assembly
// =============================================================================
//
// `NotFound`  — the provider answered but had no data for the request.
// `Provider`  — the provider call itself failed (network, HTTP status, JSON).
//
// An unrecognised timeframe is not an error: it resolves to the default.
// The HTTP layer logs `Provider` failures and answers both variants with 404.
// =============================================================================

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MarketError {
    #[error("no market data for {symbol}")]
    NotFound { symbol: String },

    #[error("market data provider failed: {0:#}")]
    Provider(#[from] anyhow::Error),
}

impl MarketError {
    pub fn not_found(symbol: impl Into<String>) -> Self {
        Self::NotFound {
            symbol: symbol.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
