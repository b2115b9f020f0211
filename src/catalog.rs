// =============================================================================
// Market Catalog — static lookup tables shared by every component
// =============================================================================
//
// Popular-symbol lists, the normaliser allow-list and the timeframe table.
// The catalog is built once at startup (defaults, optionally overridden by the
// runtime config file) and only ever read afterwards; components receive it
// by reference instead of reaching for a global.
// =============================================================================

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::symbols::{self, Exchange};
use crate::timeframe::{self, TimeframeSpec};

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn default_us_symbols() -> Vec<String> {
    strings(&[
        "AAPL", "GOOGL", "MSFT", "TSLA", "AMZN", "NVDA", "META", "SPY", "QQQ", "BTC-USD",
        "ETH-USD",
    ])
}

fn default_indian_symbols() -> Vec<String> {
    strings(&[
        "RELIANCE.NS",
        "TCS.NS",
        "HDFCBANK.NS",
        "INFY.NS",
        "HINDUNILVR.NS",
        "ITC.NS",
        "SBIN.NS",
        "BHARTIARTL.NS",
        "KOTAKBANK.NS",
        "LT.NS",
    ])
}

/// Symbols passed through without an exchange suffix: the whole US popular
/// list, so `QQQ`, `BTC-USD` and `ETH-USD` are never looked up as `<X>.NS`.
fn default_allow_list() -> Vec<String> {
    default_us_symbols()
}

fn default_timeframes() -> HashMap<String, TimeframeSpec> {
    [
        ("1m", "1m", "1d"),
        ("5m", "5m", "5d"),
        ("15m", "15m", "5d"),
        ("1h", "1h", "1mo"),
        ("4h", "1h", "3mo"),
        ("1d", "1d", "1y"),
        ("2d", "1d", "2y"),
        ("3d", "1d", "2y"),
        ("1w", "1wk", "2y"),
        ("2w", "1wk", "5y"),
        ("3w", "1wk", "5y"),
        ("1M", "1mo", "5y"),
        ("2M", "1mo", "10y"),
        ("3M", "1mo", "10y"),
        ("6M", "1mo", "max"),
        ("1Y", "1mo", "max"),
    ]
    .into_iter()
    .map(|(token, interval, lookback)| (token.to_string(), TimeframeSpec::new(interval, lookback)))
    .collect()
}

// =============================================================================
// PopularSymbols
// =============================================================================

/// Curated symbol lists served by `/api/popular`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopularSymbols {
    #[serde(rename = "US", default = "default_us_symbols")]
    pub us: Vec<String>,

    #[serde(rename = "INDIAN", default = "default_indian_symbols")]
    pub indian: Vec<String>,
}

impl Default for PopularSymbols {
    fn default() -> Self {
        Self {
            us: default_us_symbols(),
            indian: default_indian_symbols(),
        }
    }
}

// =============================================================================
// MarketCatalog
// =============================================================================

/// Immutable lookup tables used by symbol normalisation, timeframe resolution
/// and the popular-symbols endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketCatalog {
    #[serde(default)]
    pub popular: PopularSymbols,

    /// Upper-case symbols that are already provider-queryable without an
    /// exchange suffix (large caps, ETFs, crypto pairs).
    #[serde(default = "default_allow_list")]
    pub allow_list: Vec<String>,

    /// Business timeframe token => provider interval / lookback.
    #[serde(default = "default_timeframes")]
    pub timeframes: HashMap<String, TimeframeSpec>,
}

impl Default for MarketCatalog {
    fn default() -> Self {
        Self {
            popular: PopularSymbols::default(),
            allow_list: default_allow_list(),
            timeframes: default_timeframes(),
        }
    }
}

impl MarketCatalog {
    /// See [`symbols::normalize`].
    pub fn normalize_symbol(&self, raw: &str) -> String {
        symbols::normalize(raw, &self.allow_list)
    }

    /// See [`symbols::classify`].
    pub fn classify_symbol(&self, raw: &str) -> Exchange {
        symbols::classify(raw, &self.allow_list)
    }

    /// See [`timeframe::resolve`].
    pub fn resolve_timeframe(&self, token: &str) -> TimeframeSpec {
        timeframe::resolve(token, &self.timeframes)
    }
}
