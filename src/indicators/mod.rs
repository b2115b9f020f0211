// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Pure, side-effect-free implementations of the indicators drawn on the chart.
// Every function returns a series with exactly one value per input element so
// the result can be zipped with the source candles by position. The leading
// "warm-up" indices, where a full trailing window is not available yet, are
// filled with fixed fallback values that the front-end relies on.

pub mod bollinger;
pub mod rsi;
pub mod sma;

pub use bollinger::calculate_bollinger_bands;
pub use rsi::calculate_rsi;
pub use sma::calculate_sma;
