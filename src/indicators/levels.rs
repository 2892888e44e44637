// =============================================================================
// Support / Resistance — percentile proxy
// =============================================================================
//
// Sorts the last `window` closes and picks the 20th-percentile element (by
// index, `floor(0.2 * n)`) as support; resistance is the same index taken
// from the descending sort. This is a crude rank-based proxy, not pivot
// detection, and intentionally stays that way: the levels always exist for a
// non-empty window and move smoothly with the data.

use serde::{Deserialize, Serialize};

/// Percentile-rank support and resistance levels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Levels {
    pub support: f64,
    pub resistance: f64,
}

/// Compute support/resistance from the last `window` closes.
///
/// When fewer than `window` closes exist, all of them are used. Returns
/// `None` only for an empty input or a zero window.
pub fn support_resistance(closes: &[f64], window: usize) -> Option<Levels> {
    if closes.is_empty() || window == 0 {
        return None;
    }

    let take = window.min(closes.len());
    let mut sorted: Vec<f64> = closes[closes.len() - take..].to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let idx = (0.2 * take as f64).floor() as usize;
    let support = sorted[idx];
    // Same index into the descending sort.
    let resistance = sorted[take - 1 - idx];

    Some(Levels {
        support,
        resistance,
    })
}
