// =============================================================================
// Chart Assembly — candles + RSI overlay
// =============================================================================
//
//   1. normalise symbol, resolve timeframe
//   2. fetch bars (empty => NotFound)
//   3. closes -> RSI(14) -> SMA(9) of RSI, Bollinger(20, 2.0) of RSI
//   4. zip by position into IndicatorPoints sharing each candle's timestamp
//
// The Bollinger Bands wrap the RSI oscillator itself, not the price.
// =============================================================================

use tracing::debug;

use crate::catalog::MarketCatalog;
use crate::error::MarketError;
use crate::indicators::bollinger::{DEFAULT_BAND_MULTIPLIER, DEFAULT_BAND_PERIOD};
use crate::indicators::rsi::DEFAULT_RSI_PERIOD;
use crate::indicators::{calculate_bollinger_bands, calculate_rsi, calculate_sma};
use crate::provider::MarketDataProvider;
use crate::types::{ChartPayload, IndicatorPoint, PriceBar};

/// Window of the moving average drawn over the RSI line.
pub const RSI_MA_PERIOD: usize = 9;

/// Fetch bars for `symbol` at `timeframe` and build the chart payload.
pub async fn assemble_chart<P: MarketDataProvider>(
    provider: &P,
    catalog: &MarketCatalog,
    symbol: &str,
    timeframe: &str,
) -> Result<ChartPayload, MarketError> {
    let normalized = catalog.normalize_symbol(symbol);
    let spec = catalog.resolve_timeframe(timeframe);

    debug!(
        symbol,
        normalized = %normalized,
        exchange = %catalog.classify_symbol(symbol),
        interval = %spec.interval,
        lookback = %spec.lookback,
        "assembling chart"
    );

    let candles = provider
        .fetch_bars(&normalized, &spec.interval, &spec.lookback)
        .await?;

    if candles.is_empty() {
        return Err(MarketError::not_found(normalized));
    }

    let rsi = build_rsi_overlay(&candles);
    Ok(ChartPayload { candles, rsi })
}

/// Compute the RSI overlay for `candles`, one point per candle.
pub fn build_rsi_overlay(candles: &[PriceBar]) -> Vec<IndicatorPoint> {
    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();

    let rsi = calculate_rsi(&closes, DEFAULT_RSI_PERIOD);
    let rsi_ma = calculate_sma(&rsi, RSI_MA_PERIOD);
    let bands = calculate_bollinger_bands(&rsi, DEFAULT_BAND_PERIOD, DEFAULT_BAND_MULTIPLIER);

    candles
        .iter()
        .enumerate()
        .map(|(i, candle)| IndicatorPoint {
            timestamp: candle.timestamp,
            value: rsi[i],
            moving_average: rsi_ma[i],
            upper_band: bands.upper[i],
            lower_band: bands.lower[i],
        })
        .collect()
}
