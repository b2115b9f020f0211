// =============================================================================
// Timeframe Resolution — business token => provider interval / lookback
// =============================================================================
//
// Several business tokens collapse onto the same provider interval and differ
// only in how much history is requested (e.g. "2d" and "3d" are both daily
// bars over two years). Unknown tokens fall back to daily bars over one year.
// Tokens are case-sensitive: "1m" is one minute, "1M" one month.
// =============================================================================

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Provider interval used for unrecognised tokens.
pub const DEFAULT_INTERVAL: &str = "1d";

/// Provider lookback used for unrecognised tokens.
pub const DEFAULT_LOOKBACK: &str = "1y";

/// Provider-level request parameters for one chart timeframe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeframeSpec {
    /// Bar size, e.g. "1h", "1wk".
    pub interval: String,
    /// Total history span, e.g. "1mo", "max".
    pub lookback: String,
}

impl TimeframeSpec {
    pub fn new(interval: impl Into<String>, lookback: impl Into<String>) -> Self {
        Self {
            interval: interval.into(),
            lookback: lookback.into(),
        }
    }
}

impl Default for TimeframeSpec {
    fn default() -> Self {
        Self::new(DEFAULT_INTERVAL, DEFAULT_LOOKBACK)
    }
}

/// Look `token` up in `table`, falling back to `("1d", "1y")`.
pub fn resolve(token: &str, table: &HashMap<String, TimeframeSpec>) -> TimeframeSpec {
    table.get(token).cloned().unwrap_or_default()
}
