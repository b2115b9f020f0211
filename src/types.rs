// =============================================================================
// Shared types used across the market chart service
// =============================================================================
//
// Field names are serialised exactly as the dashboard front-end expects them
// (`changePercent`, `upperBB`, ...). Everything except `Watchlist` is built
// per request from freshly fetched provider data and never mutated afterwards.
// =============================================================================

use serde::{Deserialize, Serialize};

/// A single OHLCV bar, timestamped in milliseconds since the UNIX epoch.
///
/// Sequences of bars are always ordered ascending by `timestamp`, mirroring
/// the provider's return order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
}

/// One point of the RSI overlay, index-aligned with the candle it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorPoint {
    pub timestamp: i64,
    /// RSI value in [0, 100].
    pub value: f64,
    /// SMA of the RSI series.
    #[serde(rename = "ma")]
    pub moving_average: f64,
    #[serde(rename = "upperBB")]
    pub upper_band: f64,
    #[serde(rename = "lowerBB")]
    pub lower_band: f64,
}

/// Chart-ready payload: candles plus the RSI overlay, equal length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPayload {
    pub candles: Vec<PriceBar>,
    pub rsi: Vec<IndicatorPoint>,
}

/// Current price snapshot for a symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub symbol: String,
    pub name: String,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
}

/// Descriptive metadata for a symbol. Any field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolMetadata {
    #[serde(default)]
    pub long_name: Option<String>,
    #[serde(default)]
    pub short_name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
}

/// A user-defined list of symbols, stored per session.
///
/// Fields other than `id` and `symbols` (e.g. a display name) are opaque to
/// the service and are kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Watchlist {
    pub id: String,
    #[serde(default)]
    pub symbols: Vec<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indicator_point_uses_dashboard_keys() {
        let point = IndicatorPoint {
            timestamp: 1_700_000_000_000,
            value: 55.0,
            moving_average: 52.0,
            upper_band: 70.0,
            lower_band: 30.0,
        };
        let json = serde_json::to_value(&point).unwrap();
        assert_eq!(json["ma"], 52.0);
        assert_eq!(json["upperBB"], 70.0);
        assert_eq!(json["lowerBB"], 30.0);
        assert_eq!(json["timestamp"], 1_700_000_000_000_i64);
    }

    #[test]
    fn quote_serialises_camel_case() {
        let quote = Quote {
            symbol: "AAPL".into(),
            name: "Apple Inc.".into(),
            price: 110.0,
            change: 10.0,
            change_percent: 10.0,
        };
        let json = serde_json::to_value(&quote).unwrap();
        assert_eq!(json["changePercent"], 10.0);
        assert!(json.get("change_percent").is_none());
    }

    #[test]
    fn watchlist_keeps_unknown_fields() {
        let raw = r#"{ "id": "w1", "name": "Tech", "symbols": ["AAPL", "TCS"] }"#;
        let wl: Watchlist = serde_json::from_str(raw).unwrap();
        assert_eq!(wl.symbols, vec!["AAPL", "TCS"]);
        assert_eq!(wl.extra["name"], "Tech");

        let back = serde_json::to_value(&wl).unwrap();
        assert_eq!(back["name"], "Tech");
        assert_eq!(back["id"], "w1");
    }

    #[test]
    fn watchlist_without_symbols_defaults_to_empty() {
        let wl: Watchlist = serde_json::from_str(r#"{ "id": "w2" }"#).unwrap();
        assert!(wl.symbols.is_empty());
    }
}
