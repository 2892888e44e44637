// =============================================================================
// Bollinger Bands
// =============================================================================
//
// Bollinger Bands consist of a middle band (SMA), an upper band (SMA + k*σ),
// and a lower band (SMA - k*σ), where σ is the population standard deviation
// of the window around the middle band. The bands act as a volatility
// envelope: for k > 0, upper >= middle >= lower always holds.

use serde::{Deserialize, Serialize};

/// Result of a Bollinger Band calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BollingerBands {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

/// Calculate Bollinger Bands over the last `period` closes.
///
/// Returns `None` when there are fewer than `period` closes, `period` is
/// zero, or the inputs produce non-finite bands.
pub fn bollinger(closes: &[f64], period: usize, k: f64) -> Option<BollingerBands> {
    if period == 0 || closes.len() < period {
        return None;
    }

    let window = &closes[closes.len() - period..];
    let middle = window.iter().sum::<f64>() / period as f64;

    let variance = window.iter().map(|x| (x - middle).powi(2)).sum::<f64>() / period as f64;
    let std_dev = variance.sqrt();

    let upper = middle + k * std_dev;
    let lower = middle - k * std_dev;

    if upper.is_finite() && lower.is_finite() {
        Some(BollingerBands { upper, middle, lower })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::sma::sma;

    #[test]
    fn bollinger_band_ordering() {
        let closes: Vec<f64> = (1..=20).map(|x| x as f64).collect();
        let bb = bollinger(&closes, 20, 2.0).unwrap();
        assert!(bb.upper > bb.middle);
        assert!(bb.lower < bb.middle);
    }

    #[test]
    fn bollinger_middle_equals_sma() {
        let closes: Vec<f64> = (1..=40).map(|x| ((x * 7) % 13) as f64 + 50.0).collect();
        let bb = bollinger(&closes, 20, 2.0).unwrap();
        let mean = sma(&closes, 20).unwrap();
        assert!((bb.middle - mean).abs() < 1e-10);
    }

    #[test]
    fn bollinger_insufficient_data() {
        assert!(bollinger(&[1.0, 2.0, 3.0], 20, 2.0).is_none());
    }

    #[test]
    fn bollinger_flat_series_collapses() {
        let closes = vec![100.0; 20];
        let bb = bollinger(&closes, 20, 2.0).unwrap();
        assert!((bb.upper - 100.0).abs() < 1e-10);
        assert!((bb.middle - 100.0).abs() < 1e-10);
        assert!((bb.lower - 100.0).abs() < 1e-10);
    }

    #[test]
    fn bollinger_known_sigma() {
        // Window [2, 4, 4, 4, 5, 5, 7, 9]: mean 5, population σ = 2.
        let closes = vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let bb = bollinger(&closes, 8, 2.0).unwrap();
        assert!((bb.middle - 5.0).abs() < 1e-10);
        assert!((bb.upper - 9.0).abs() < 1e-10);
        assert!((bb.lower - 1.0).abs() < 1e-10);
    }
}
