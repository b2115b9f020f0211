// =============================================================================
// Yahoo Finance v8 chart client
// =============================================================================
//
// One endpoint serves both collaborator calls:
//
//   GET {base_url}/v8/finance/chart/{symbol}?interval={interval}&range={range}
//
// `result[0].meta` carries the display names, `timestamp` + `indicators.quote`
// carry the bars. Yahoo reports unknown symbols as a chart-level
// `{"code": "Not Found"}` error (usually with HTTP 404); that is mapped to
// "no data" rather than a failure.
// =============================================================================

use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use super::MarketDataProvider;
use crate::runtime_config::ProviderSettings;
use crate::types::{PriceBar, SymbolMetadata};

/// Chart-level error code Yahoo uses for unknown or delisted symbols.
const NOT_FOUND_CODE: &str = "Not Found";

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    #[serde(default)]
    meta: Option<SymbolMetadata>,
    #[serde(default)]
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteData>,
}

#[derive(Debug, Default, Deserialize)]
struct QuoteData {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Yahoo Finance chart API client.
#[derive(Clone)]
pub struct YahooProvider {
    base_url: String,
    client: reqwest::Client,
}

impl YahooProvider {
    /// Build a client from the provider section of the runtime config.
    pub fn new(settings: &ProviderSettings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(settings.user_agent.clone())
            .build()
            .context("failed to build reqwest client for YahooProvider")?;

        let base_url = settings.base_url.trim_end_matches('/').to_string();
        debug!(base_url = %base_url, "YahooProvider initialised");

        Ok(Self { base_url, client })
    }

    /// GET the chart endpoint. Returns `None` when Yahoo reports the symbol as
    /// unknown.
    async fn get_chart(&self, symbol: &str, interval: &str, range: &str) -> Result<Option<ChartData>> {
        let url = format!("{}/v8/finance/chart/{}", self.base_url, symbol);

        let resp = self
            .client
            .get(&url)
            .query(&[("interval", interval), ("range", range)])
            .send()
            .await
            .with_context(|| format!("GET chart for {symbol} failed"))?;

        let status = resp.status();
        let body: serde_json::Value = resp
            .json()
            .await
            .with_context(|| format!("failed to read chart response for {symbol}"))?;

        // Yahoo answers unknown symbols with 404 *and* a structured body, so
        // the body is inspected before the status.
        let parsed: Option<ChartResponse> = serde_json::from_value(body.clone()).ok();
        match parsed {
            Some(chart) => Self::extract_chart_data(symbol, chart),
            None if !status.is_success() => {
                anyhow::bail!("Yahoo chart for {} returned {}: {}", symbol, status, body)
            }
            None => anyhow::bail!("unexpected chart response shape for {symbol}: {body}"),
        }
    }

    fn extract_chart_data(symbol: &str, resp: ChartResponse) -> Result<Option<ChartData>> {
        if let Some(err) = resp.chart.error {
            if err.code == NOT_FOUND_CODE {
                debug!(symbol, description = %err.description, "symbol not found upstream");
                return Ok(None);
            }
            anyhow::bail!("Yahoo chart error for {}: {}: {}", symbol, err.code, err.description);
        }

        Ok(resp.chart.result.and_then(|r| r.into_iter().next()))
    }

    /// Zip the column-oriented quote arrays into bars.
    ///
    /// Rows with any missing price are skipped (non-trading slots); a missing
    /// volume becomes 0. Timestamps are converted from seconds to milliseconds.
    fn parse_bars(symbol: &str, data: ChartData) -> Vec<PriceBar> {
        let timestamps = data.timestamp.unwrap_or_default();
        let quote = data.indicators.quote.into_iter().next().unwrap_or_default();

        let mut bars = Vec::with_capacity(timestamps.len());
        let mut skipped = 0usize;

        for (i, &ts) in timestamps.iter().enumerate() {
            let field = |col: &Vec<Option<f64>>| col.get(i).copied().flatten();

            let (Some(open), Some(high), Some(low), Some(close)) = (
                field(&quote.open),
                field(&quote.high),
                field(&quote.low),
                field(&quote.close),
            ) else {
                skipped += 1;
                continue;
            };

            bars.push(PriceBar {
                timestamp: ts * 1000,
                open,
                high,
                low,
                close,
                volume: field(&quote.volume).map_or(0, |v| v as i64),
            });
        }

        if skipped > 0 {
            warn!(symbol, skipped, "skipped bars with missing prices");
        }

        bars
    }
}

impl MarketDataProvider for YahooProvider {
    #[instrument(skip(self), name = "yahoo::fetch_bars")]
    async fn fetch_bars(&self, symbol: &str, interval: &str, lookback: &str) -> Result<Vec<PriceBar>> {
        let bars = match self.get_chart(symbol, interval, lookback).await? {
            Some(data) => Self::parse_bars(symbol, data),
            None => Vec::new(),
        };
        debug!(symbol, interval, lookback, count = bars.len(), "bars fetched");
        Ok(bars)
    }

    #[instrument(skip(self), name = "yahoo::fetch_metadata")]
    async fn fetch_metadata(&self, symbol: &str) -> Result<Option<SymbolMetadata>> {
        let meta = self
            .get_chart(symbol, "1d", "1d")
            .await?
            .and_then(|data| data.meta);
        debug!(symbol, found = meta.is_some(), "metadata fetched");
        Ok(meta)
    }
}

impl std::fmt::Debug for YahooProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YahooProvider")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<Option<ChartData>> {
        let resp: ChartResponse = serde_json::from_str(json).unwrap();
        YahooProvider::extract_chart_data("TEST", resp)
    }

    const CHART: &str = r#"{
        "chart": {
            "result": [{
                "meta": { "symbol": "AAPL", "longName": "Apple Inc.", "shortName": "Apple", "currency": "USD" },
                "timestamp": [1700000000, 1700086400, 1700172800],
                "indicators": { "quote": [{
                    "open":   [100.0, null, 102.0],
                    "high":   [101.0, null, 103.5],
                    "low":    [99.0,  null, 101.0],
                    "close":  [100.5, null, 103.0],
                    "volume": [1500,  null, null]
                }]}
            }],
            "error": null
        }
    }"#;

    #[test]
    fn parses_bars_and_skips_gaps() {
        let data = parse(CHART).unwrap().unwrap();
        let bars = YahooProvider::parse_bars("AAPL", data);
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].timestamp, 1_700_000_000_000);
        assert_eq!(bars[0].volume, 1500);
        assert_eq!(bars[1].timestamp, 1_700_172_800_000);
        assert_eq!(bars[1].close, 103.0);
        assert_eq!(bars[1].volume, 0);
    }

    #[test]
    fn parses_meta_names() {
        let data = parse(CHART).unwrap().unwrap();
        let meta = data.meta.unwrap();
        assert_eq!(meta.symbol.as_deref(), Some("AAPL"));
        assert_eq!(meta.long_name.as_deref(), Some("Apple Inc."));
        assert_eq!(meta.short_name.as_deref(), Some("Apple"));
    }

    #[test]
    fn not_found_is_no_data() {
        let json = r#"{ "chart": { "result": null,
            "error": { "code": "Not Found", "description": "No data found, symbol may be delisted" } } }"#;
        assert!(parse(json).unwrap().is_none());
    }

    #[test]
    fn other_chart_errors_fail() {
        let json = r#"{ "chart": { "result": null,
            "error": { "code": "Bad Request", "description": "Invalid input - interval=7m is not supported" } } }"#;
        let err = parse(json).unwrap_err();
        assert!(err.to_string().contains("Bad Request"));
    }

    #[test]
    fn missing_timestamps_yield_empty_series() {
        let json = r#"{ "chart": { "result": [{ "meta": {}, "indicators": { "quote": [{}] } }], "error": null } }"#;
        let data = parse(json).unwrap().unwrap();
        assert!(YahooProvider::parse_bars("X", data).is_empty());
    }

    #[test]
    fn new_trims_trailing_slash() {
        let settings = ProviderSettings {
            base_url: "https://query1.finance.yahoo.com/".into(),
            ..ProviderSettings::default()
        };
        let provider = YahooProvider::new(&settings).unwrap();
        assert_eq!(provider.base_url, "https://query1.finance.yahoo.com");
    }
}
