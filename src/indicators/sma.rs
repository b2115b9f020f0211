// =============================================================================
// Simple Moving Average (SMA)
// =============================================================================
//
// SMA_i = (v_{i-period+1} + ... + v_i) / period
//
// Warm-up: for i < period - 1 the raw input value is passed through unchanged
// (not zero-padded, not interpolated).
// =============================================================================

/// Compute an SMA series with the same length as `values`.
///
/// # Edge cases
/// - `period == 0` => a copy of `values`
/// - `values.len() < period` => every element is a warm-up passthrough
pub fn calculate_sma(values: &[f64], period: usize) -> Vec<f64> {
    if period == 0 {
        return values.to_vec();
    }

    let period_f = period as f64;
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            if i + 1 < period {
                v
            } else {
                values[i + 1 - period..=i].iter().sum::<f64>() / period_f
            }
        })
        .collect()
}
