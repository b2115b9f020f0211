// =============================================================================
// Symbol Search — direct lookup with an NSE retry
// =============================================================================
//
// There is no full-text index behind this: the query is tried as a ticker,
// and if the provider does not know it (and it is short enough) the same
// ticker is tried on the National Stock Exchange. Results are partial quotes
// with zeroed prices.
// =============================================================================

use tracing::debug;

use crate::provider::MarketDataProvider;
use crate::types::{Quote, SymbolMetadata};

/// Queries shorter than this return no results.
pub const MIN_QUERY_LEN: usize = 2;

/// Upper bound on returned results.
pub const MAX_RESULTS: usize = 10;

/// Longest query that is retried with the `.NS` suffix.
const MAX_NSE_RETRY_LEN: usize = 10;

/// Look `query` up as a ticker. Provider failures count as "no match".
pub async fn search_symbols<P: MarketDataProvider>(provider: &P, query: &str) -> Vec<Quote> {
    let query_len = query.chars().count();
    if query_len < MIN_QUERY_LEN {
        return Vec::new();
    }

    let upper = query.to_uppercase();
    let mut results = Vec::new();

    if let Some(hit) = lookup(provider, &upper, query).await {
        results.push(hit);
    }

    if results.is_empty() && query_len <= MAX_NSE_RETRY_LEN {
        if let Some(hit) = lookup(provider, &format!("{upper}.NS"), query).await {
            results.push(hit);
        }
    }

    results.truncate(MAX_RESULTS);
    results
}

async fn lookup<P: MarketDataProvider>(provider: &P, ticker: &str, query: &str) -> Option<Quote> {
    match provider.fetch_metadata(ticker).await {
        Ok(Some(meta)) => partial_quote(meta, query),
        Ok(None) => None,
        Err(e) => {
            debug!(ticker, error = %format!("{e:#}"), "search lookup failed");
            None
        }
    }
}

/// Only metadata that names a symbol counts as a hit.
fn partial_quote(meta: SymbolMetadata, query: &str) -> Option<Quote> {
    let symbol = meta.symbol?;
    let name = meta
        .long_name
        .or(meta.short_name)
        .unwrap_or_else(|| query.to_string());

    Some(Quote {
        symbol,
        name,
        price: 0.0,
        change: 0.0,
        change_percent: 0.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::mock::MockProvider;

    #[tokio::test]
    async fn short_query_returns_nothing() {
        let provider = MockProvider::new().with_name("A", "Agilent");
        assert!(search_symbols(&provider, "a").await.is_empty());
        assert!(provider.metadata_calls.lock().is_empty());
    }

    #[tokio::test]
    async fn direct_hit_is_upper_cased() {
        let provider = MockProvider::new().with_name("MSFT", "Microsoft Corporation");
        let results = search_symbols(&provider, "msft").await;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].symbol, "MSFT");
        assert_eq!(results[0].name, "Microsoft Corporation");
        assert_eq!(results[0].price, 0.0);
        assert_eq!(*provider.metadata_calls.lock(), vec!["MSFT".to_string()]);
    }

    #[tokio::test]
    async fn falls_back_to_nse() {
        let provider = MockProvider::new().with_name("INFY.NS", "Infosys Limited");
        let results = search_symbols(&provider, "infy").await;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].symbol, "INFY.NS");
        assert_eq!(
            *provider.metadata_calls.lock(),
            vec!["INFY".to_string(), "INFY.NS".to_string()]
        );
    }

    #[tokio::test]
    async fn provider_errors_count_as_misses() {
        let provider = MockProvider::new()
            .failing("ITC")
            .with_name("ITC.NS", "ITC Limited");
        let results = search_symbols(&provider, "itc").await;
        assert_eq!(results[0].symbol, "ITC.NS");
    }

    #[tokio::test]
    async fn long_query_skips_nse_retry() {
        let provider = MockProvider::new();
        assert!(search_symbols(&provider, "ABCDEFGHIJK").await.is_empty());
        assert_eq!(provider.metadata_calls.lock().len(), 1);
    }

    #[tokio::test]
    async fn name_falls_back_to_short_name_then_query() {
        let provider = MockProvider::new().with_metadata(
            "XYZ",
            SymbolMetadata {
                long_name: None,
                short_name: Some("Xyz Corp".into()),
                symbol: Some("XYZ".into()),
            },
        );
        assert_eq!(search_symbols(&provider, "xyz").await[0].name, "Xyz Corp");

        let provider = MockProvider::new().with_metadata(
            "XYZ",
            SymbolMetadata {
                symbol: Some("XYZ".into()),
                ..SymbolMetadata::default()
            },
        );
        assert_eq!(search_symbols(&provider, "xyz").await[0].name, "xyz");
    }

    #[tokio::test]
    async fn metadata_without_symbol_is_a_miss() {
        let provider = MockProvider::new().with_metadata("QQ", SymbolMetadata::default());
        assert!(search_symbols(&provider, "qq").await.is_empty());
    }
}
