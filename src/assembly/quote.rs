// =============================================================================
// Quote Assembly — price / change / percent from the last two daily bars
// =============================================================================

use tracing::{debug, warn};

use crate::catalog::MarketCatalog;
use crate::error::MarketError;
use crate::provider::MarketDataProvider;
use crate::types::Quote;

/// Interval / lookback used to fetch the two most recent daily bars.
const QUOTE_INTERVAL: &str = "1d";
const QUOTE_LOOKBACK: &str = "2d";

/// Build a [`Quote`] for `symbol`.
///
/// The reported symbol is the caller's input upper-cased (not the normalised
/// provider symbol). The display name is the provider's long name, falling
/// back to the input; a failed metadata lookup only degrades the name.
pub async fn assemble_quote<P: MarketDataProvider>(
    provider: &P,
    catalog: &MarketCatalog,
    symbol: &str,
) -> Result<Quote, MarketError> {
    let normalized = catalog.normalize_symbol(symbol);

    let bars = provider
        .fetch_bars(&normalized, QUOTE_INTERVAL, QUOTE_LOOKBACK)
        .await?;

    let (current, previous) = match bars.as_slice() {
        [] => return Err(MarketError::not_found(normalized)),
        [only] => (only.close, only.close),
        [.., prev, last] => (last.close, prev.close),
    };

    let name = match provider.fetch_metadata(&normalized).await {
        Ok(meta) => meta.and_then(|m| m.long_name),
        Err(e) => {
            warn!(symbol = %normalized, error = %format!("{e:#}"), "metadata lookup failed, using symbol as name");
            None
        }
    }
    .unwrap_or_else(|| symbol.to_string());

    let change = current - previous;
    let change_percent = if previous != 0.0 {
        change / previous * 100.0
    } else {
        0.0
    };

    debug!(symbol = %normalized, price = current, change, "quote assembled");

    Ok(Quote {
        symbol: symbol.to_uppercase(),
        name,
        price: current,
        change,
        change_percent,
    })
}
