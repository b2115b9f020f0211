// =============================================================================
// Relative Strength Index (RSI) — rolling-mean variant
// =============================================================================
//
// Step 1 — Compute price changes (deltas) from consecutive closes.
// Step 2 — Split each delta into a gain (max(d, 0)) and a loss (max(-d, 0)).
// Step 3 — For output index i >= period, average the `period` gains / losses
//          immediately preceding i (deltas i-period .. i-1). This is a plain
//          rolling mean, NOT Wilder's exponential smoothing.
// Step 4 — RS  = avg_gain / avg_loss
//          RSI = 100 - 100 / (1 + RS), or 100.0 when avg_loss == 0.
//
// Output indices below `period` are pinned to the neutral value 50.0.
// =============================================================================

/// Default look-back used by the chart overlay.
pub const DEFAULT_RSI_PERIOD: usize = 14;

/// Value emitted wherever RSI cannot be computed yet.
pub const NEUTRAL_RSI: f64 = 50.0;

/// Compute the RSI series for `prices`, one value per price.
///
/// # Edge cases
/// - `period == 0` => all 50.0
/// - `prices.len() < period + 1` => all 50.0
/// - Average loss of exactly zero (flat or only-rising window) => 100.0
pub fn calculate_rsi(prices: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || prices.len() < period + 1 {
        return vec![NEUTRAL_RSI; prices.len()];
    }

    let deltas: Vec<f64> = prices.windows(2).map(|w| w[1] - w[0]).collect();
    let gains: Vec<f64> = deltas.iter().map(|&d| d.max(0.0)).collect();
    let losses: Vec<f64> = deltas.iter().map(|&d| (-d).max(0.0)).collect();

    let period_f = period as f64;
    let mut result = Vec::with_capacity(prices.len());

    for i in 0..prices.len() {
        if i < period {
            result.push(NEUTRAL_RSI);
            continue;
        }

        // Each window is summed afresh: a loss-free window must be exactly 0.0.
        let avg_gain = gains[i - period..i].iter().sum::<f64>() / period_f;
        let avg_loss = losses[i - period..i].iter().sum::<f64>() / period_f;

        result.push(rsi_from_averages(avg_gain, avg_loss));
    }

    result
}

/// Convert average gain / average loss into an RSI value in [0, 100].
fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    100.0 - 100.0 / (1.0 + rs)
}
