// =============================================================================
// Average Volume
// =============================================================================

/// Mean volume of the last `period` bars (all of them when shorter).
///
/// Returns `0.0` for an empty input or zero period; volume has no meaningful
/// "unavailable" state once at least one bar exists.
pub fn average_volume(volumes: &[u64], period: usize) -> f64 {
    if volumes.is_empty() || period == 0 {
        return 0.0;
    }

    let take = period.min(volumes.len());
    let window = &volumes[volumes.len() - take..];
    window.iter().sum::<u64>() as f64 / take as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn avg_volume_basic() {
        assert!((average_volume(&[100, 200, 300], 3) - 200.0).abs() < 1e-10);
    }

    #[test]
    fn avg_volume_trailing_window() {
        assert!((average_volume(&[1_000_000, 100, 200, 300], 3) - 200.0).abs() < 1e-10);
    }

    #[test]
    fn avg_volume_short_input_uses_all() {
        assert!((average_volume(&[50, 150], 20) - 100.0).abs() < 1e-10);
    }

    #[test]
    fn avg_volume_empty() {
        assert!(average_volume(&[], 20).abs() < 1e-10);
    }
}
