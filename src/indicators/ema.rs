// =============================================================================
// Exponential Moving Average (EMA)
// =============================================================================
//
// EMA gives more weight to recent prices, making it more responsive to new
// information than the Simple Moving Average (SMA).
//
// Formula:
//   multiplier = 2 / (period + 1)
//   EMA_t      = close_t * multiplier + EMA_{t-1} * (1 - multiplier)
//
// The default (legacy) mode seeds the recursion with the SMA of the *first*
// `period` closes of the full window and then iterates across every remaining
// close. This front-seeded warm-up is the behaviour the dashboard always had;
// its numeric output differs from an EMA warmed up on recent data only, so it
// is preserved behind a flag rather than corrected. With `seed_from_front`
// disabled, the warm-up is restricted to the most recent `2 * period` closes
// before the same recursion runs.

/// Compute the latest EMA value for `closes` with look-back `period`.
///
/// Returns `None` when `period` is zero, the input is shorter than `period`,
/// or the recursion produces a non-finite value.
pub fn ema(closes: &[f64], period: usize, seed_from_front: bool) -> Option<f64> {
    if period == 0 || closes.len() < period {
        return None;
    }

    let window = if seed_from_front {
        closes
    } else {
        let start = closes.len().saturating_sub(2 * period);
        &closes[start..]
    };

    let multiplier = 2.0 / (period as f64 + 1.0);

    // Seed: SMA of the first `period` values of the chosen window.
    let mut value = window[..period].iter().sum::<f64>() / period as f64;
    if !value.is_finite() {
        return None;
    }

    for &close in &window[period..] {
        value = close * multiplier + value * (1.0 - multiplier);
        if !value.is_finite() {
            return None;
        }
    }

    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ema_empty_input() {
        assert!(ema(&[], 5, true).is_none());
    }

    #[test]
    fn ema_period_zero() {
        assert!(ema(&[1.0, 2.0, 3.0], 0, true).is_none());
    }

    #[test]
    fn ema_insufficient_data() {
        assert!(ema(&[1.0, 2.0], 5, true).is_none());
    }

    #[test]
    fn ema_period_equals_length_is_sma() {
        let closes = vec![2.0, 4.0, 6.0];
        let value = ema(&closes, 3, true).unwrap();
        assert!((value - 4.0).abs() < 1e-10);
    }

    #[test]
    fn ema_known_values_front_seeded() {
        // 5-period EMA of [1..10]: SMA of first 5 = 3.0, multiplier = 1/3.
        let closes: Vec<f64> = (1..=10).map(|x| x as f64).collect();
        let mult = 2.0 / 6.0;
        let mut expected = 3.0;
        for &c in &closes[5..] {
            expected = c * mult + expected * (1.0 - mult);
        }
        let value = ema(&closes, 5, true).unwrap();
        assert!((value - expected).abs() < 1e-10, "got {value}, expected {expected}");
    }

    #[test]
    fn ema_trailing_mode_ignores_old_history() {
        // With seed_from_front = false only the last 2*period closes matter,
        // so a wild prefix must not change the result.
        let mut short: Vec<f64> = (1..=10).map(|x| x as f64).collect();
        let value_short = ema(&short, 5, false).unwrap();

        let mut long = vec![10_000.0, 9_999.0, 5.0];
        long.append(&mut short);
        let value_long = ema(&long, 5, false).unwrap();

        assert!((value_short - value_long).abs() < 1e-10);
    }

    #[test]
    fn ema_front_and_trailing_agree_on_exact_window() {
        let closes: Vec<f64> = (1..=10).map(|x| x as f64).collect();
        let front = ema(&closes, 5, true).unwrap();
        let trailing = ema(&closes, 5, false).unwrap();
        assert!((front - trailing).abs() < 1e-10);
    }

    #[test]
    fn ema_rejects_nan_input() {
        let closes = vec![1.0, 2.0, 3.0, f64::NAN, 5.0];
        assert!(ema(&closes, 3, true).is_none());
    }
}
