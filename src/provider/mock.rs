//! In-process provider used by unit tests.

use std::collections::{HashMap, HashSet};

use anyhow::Result;
use parking_lot::Mutex;

use super::MarketDataProvider;
use crate::types::{PriceBar, SymbolMetadata};

/// Canned bars / metadata keyed by normalised symbol. Symbols listed in
/// `failing` return an error from every call.
#[derive(Default)]
pub struct MockProvider {
    pub bars: HashMap<String, Vec<PriceBar>>,
    pub metadata: HashMap<String, SymbolMetadata>,
    pub failing: HashSet<String>,
    /// Every `fetch_bars` call as (symbol, interval, lookback).
    pub bar_calls: Mutex<Vec<(String, String, String)>>,
    /// Every `fetch_metadata` call.
    pub metadata_calls: Mutex<Vec<String>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_closes(mut self, symbol: &str, closes: &[f64]) -> Self {
        self.bars.insert(symbol.to_string(), bars_from_closes(closes));
        self
    }

    pub fn with_name(mut self, symbol: &str, long_name: &str) -> Self {
        self.metadata.insert(
            symbol.to_string(),
            SymbolMetadata {
                long_name: Some(long_name.to_string()),
                short_name: None,
                symbol: Some(symbol.to_string()),
            },
        );
        self
    }

    pub fn with_metadata(mut self, symbol: &str, meta: SymbolMetadata) -> Self {
        self.metadata.insert(symbol.to_string(), meta);
        self
    }

    pub fn failing(mut self, symbol: &str) -> Self {
        self.failing.insert(symbol.to_string());
        self
    }
}

/// Daily bars, one day apart, with the given closes.
pub fn bars_from_closes(closes: &[f64]) -> Vec<PriceBar> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| PriceBar {
            timestamp: 1_700_000_000_000 + i as i64 * 86_400_000,
            open: close,
            high: close + 1.0,
            low: close - 1.0,
            close,
            volume: 1_000 + i as i64,
        })
        .collect()
}

impl MarketDataProvider for MockProvider {
    async fn fetch_bars(&self, symbol: &str, interval: &str, lookback: &str) -> Result<Vec<PriceBar>> {
        self.bar_calls
            .lock()
            .push((symbol.to_string(), interval.to_string(), lookback.to_string()));
        if self.failing.contains(symbol) {
            anyhow::bail!("simulated provider outage for {symbol}");
        }
        Ok(self.bars.get(symbol).cloned().unwrap_or_default())
    }

    async fn fetch_metadata(&self, symbol: &str) -> Result<Option<SymbolMetadata>> {
        self.metadata_calls.lock().push(symbol.to_string());
        if self.failing.contains(symbol) {
            anyhow::bail!("simulated provider outage for {symbol}");
        }
        Ok(self.metadata.get(symbol).cloned())
    }
}
