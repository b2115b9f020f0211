// =============================================================================
// Bollinger Bands
// =============================================================================
//
// Bollinger Bands consist of a middle band (SMA), an upper band (SMA + k*σ),
// and a lower band (SMA - k*σ), where σ is the POPULATION standard deviation
// of the trailing window (divide by `period`, not `period - 1`).
//
// Warm-up: for i < period - 1 the bands are a fixed ±10 placeholder around the
// raw value. The chart overlay draws these as-is, so they must stay verbatim.

use super::sma::calculate_sma;

/// Default window length for the RSI band.
pub const DEFAULT_BAND_PERIOD: usize = 20;

/// Default standard-deviation multiplier.
pub const DEFAULT_BAND_MULTIPLIER: f64 = 2.0;

/// Offset of the warm-up placeholder band from the raw value.
const WARMUP_OFFSET: f64 = 10.0;

/// Upper and lower band series, each the same length as the input.
#[derive(Debug, Clone, PartialEq)]
pub struct BollingerBands {
    pub upper: Vec<f64>,
    pub lower: Vec<f64>,
}

/// Calculate Bollinger Bands over `values`.
///
/// `period == 0` is treated as an all-warm-up series.
pub fn calculate_bollinger_bands(values: &[f64], period: usize, multiplier: f64) -> BollingerBands {
    let sma = calculate_sma(values, period);
    let period_f = period as f64;

    let mut upper = Vec::with_capacity(values.len());
    let mut lower = Vec::with_capacity(values.len());

    for (i, &v) in values.iter().enumerate() {
        if period == 0 || i + 1 < period {
            upper.push(v + WARMUP_OFFSET);
            lower.push(v - WARMUP_OFFSET);
            continue;
        }

        let window = &values[i + 1 - period..=i];
        let mean = sma[i];
        let variance = window.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / period_f;
        let std_dev = variance.sqrt();

        upper.push(mean + multiplier * std_dev);
        lower.push(mean - multiplier * std_dev);
    }

    BollingerBands { upper, lower }
}
