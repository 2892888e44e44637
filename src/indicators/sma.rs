// =============================================================================
// Simple Moving Average (SMA)
// =============================================================================
//
// SMA is the arithmetic mean of the most recent `period` closing prices.
// It doubles as the middle Bollinger band when computed with the same period.

/// Compute the SMA of the last `period` closes.
///
/// Returns `None` when `period` is zero or there are fewer than `period`
/// closes. Callers must treat the absence as "unavailable", never as zero.
pub fn sma(closes: &[f64], period: usize) -> Option<f64> {
    if period == 0 || closes.len() < period {
        return None;
    }

    let window = &closes[closes.len() - period..];
    let mean = window.iter().sum::<f64>() / period as f64;

    mean.is_finite().then_some(mean)
}
