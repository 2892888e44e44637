// =============================================================================
// Relative Strength Index (RSI) — trailing-window simple averages
// =============================================================================
//
// RSI measures the speed and magnitude of recent price changes to evaluate
// whether an asset is overbought or oversold.
//
// Step 1 — Take the last `period` deltas between consecutive closes.
// Step 2 — avg_gain = sum of positive deltas / period
//          avg_loss = sum of negative-delta magnitudes / period
// Step 3 — RS  = avg_gain / avg_loss
//          RSI = 100 - 100 / (1 + RS)
//
// The averages are plain sums over the trailing window, not Wilder's
// exponential smoothing. Thresholds: RSI > 70 => OVERBOUGHT, RSI < 30 =>
// OVERSOLD.

/// Compute RSI over the trailing `period` deltas of `closes`.
///
/// # Edge cases
/// - Fewer than `period + 1` closes (or `period == 0`) => neutral `50.0`.
///   This is an explicit placeholder for short history, not an error.
/// - `avg_loss == 0` (no down moves, including a perfectly flat series)
///   => `100.0`, the boundary value, never NaN/Infinity.
pub fn rsi(closes: &[f64], period: usize) -> f64 {
    if period == 0 || closes.len() < period + 1 {
        return 50.0;
    }

    let tail = &closes[closes.len() - period - 1..];
    let (sum_gain, sum_loss) = tail.windows(2).fold((0.0_f64, 0.0_f64), |(g, l), w| {
        let delta = w[1] - w[0];
        if delta > 0.0 {
            (g + delta, l)
        } else {
            (g, l + delta.abs())
        }
    });

    let period_f = period as f64;
    let avg_gain = sum_gain / period_f;
    let avg_loss = sum_loss / period_f;

    if avg_loss == 0.0 {
        return 100.0;
    }

    let rs = avg_gain / avg_loss;
    let value = 100.0 - 100.0 / (1.0 + rs);

    if value.is_finite() {
        value
    } else {
        50.0
    }
}
