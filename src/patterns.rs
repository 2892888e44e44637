// =============================================================================
// Pattern Detection — trend slope and level breaks
// =============================================================================
//
// Coarse chart-pattern labels for the dashboard:
// - "uptrend" / "downtrend" when the least-squares slope of the last 10
//   closes exceeds +/-0.5 price units per bar.
// - "breakout_resistance" when the recent 5-bar high clears the prior 15-bar
//   high by 2 %.
// - "breakdown_support" when the recent 5-bar low undercuts the prior 15-bar
//   low by 2 %.
//
// Needs at least 20 closes; shorter windows yield no labels.

/// Slope threshold, in price units per bar.
const TREND_SLOPE_MIN: f64 = 0.5;

/// Break factor over/under the prior extreme.
const BREAK_FACTOR: f64 = 0.02;

/// Detect pattern labels over `closes` (oldest-first).
pub fn detect(closes: &[f64]) -> Vec<&'static str> {
    if closes.len() < 20 {
        return Vec::new();
    }

    let mut patterns = Vec::new();

    let slope = least_squares_slope(&closes[closes.len() - 10..]);
    if slope > TREND_SLOPE_MIN {
        patterns.push("uptrend");
    } else if slope < -TREND_SLOPE_MIN {
        patterns.push("downtrend");
    }

    let recent = &closes[closes.len() - 5..];
    let prior = &closes[closes.len() - 20..closes.len() - 5];

    let recent_high = recent.iter().cloned().fold(f64::MIN, f64::max);
    let prior_high = prior.iter().cloned().fold(f64::MIN, f64::max);
    if recent_high > prior_high * (1.0 + BREAK_FACTOR) {
        patterns.push("breakout_resistance");
    }

    let recent_low = recent.iter().cloned().fold(f64::MAX, f64::min);
    let prior_low = prior.iter().cloned().fold(f64::MAX, f64::min);
    if recent_low < prior_low * (1.0 - BREAK_FACTOR) {
        patterns.push("breakdown_support");
    }

    patterns
}

/// Slope of the least-squares line through `values` at x = 0, 1, 2, ...
fn least_squares_slope(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    if values.len() < 2 {
        return 0.0;
    }

    let x_mean = (n - 1.0) / 2.0;
    let y_mean = values.iter().sum::<f64>() / n;

    let mut num = 0.0;
    let mut den = 0.0;
    for (i, &y) in values.iter().enumerate() {
        let dx = i as f64 - x_mean;
        num += dx * (y - y_mean);
        den += dx * dx;
    }

    if den == 0.0 {
        0.0
    } else {
        num / den
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_history_yields_nothing() {
        let closes: Vec<f64> = (0..19).map(|i| 100.0 + i as f64).collect();
        assert!(detect(&closes).is_empty());
    }

    #[test]
    fn steady_rise_is_uptrend() {
        let closes: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();
        let patterns = detect(&closes);
        assert!(patterns.contains(&"uptrend"));
        assert!(!patterns.contains(&"downtrend"));
    }

    #[test]
    fn steady_fall_is_downtrend() {
        let closes: Vec<f64> = (0..30).map(|i| 200.0 - i as f64).collect();
        assert!(detect(&closes).contains(&"downtrend"));
    }

    #[test]
    fn flat_series_has_no_trend() {
        let closes = vec![100.0; 30];
        assert!(detect(&closes).is_empty());
    }

    #[test]
    fn spike_over_prior_high_is_breakout() {
        let mut closes = vec![100.0; 15];
        closes.extend(vec![104.0; 5]);
        let patterns = detect(&closes);
        assert!(patterns.contains(&"breakout_resistance"));
        assert!(!patterns.contains(&"breakdown_support"));
    }

    #[test]
    fn drop_under_prior_low_is_breakdown() {
        let mut closes = vec![100.0; 15];
        closes.extend(vec![96.0; 5]);
        assert!(detect(&closes).contains(&"breakdown_support"));
    }

    #[test]
    fn small_moves_do_not_break_levels() {
        let mut closes = vec![100.0; 15];
        closes.extend(vec![101.0; 5]);
        let patterns = detect(&closes);
        assert!(!patterns.contains(&"breakout_resistance"));
        assert!(!patterns.contains(&"breakdown_support"));
    }

    #[test]
    fn slope_of_known_line() {
        let values: Vec<f64> = (0..10).map(|i| 3.0 * i as f64 + 7.0).collect();
        assert!((least_squares_slope(&values) - 3.0).abs() < 1e-10);
    }
}
