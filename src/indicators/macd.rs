// =============================================================================
// Moving Average Convergence Divergence (MACD)
// =============================================================================
//
// MACD line = EMA(fast) - EMA(slow).
//
// The signal line here is NOT the conventional 9-period EMA of the MACD line:
// it is a flat damping of the line itself (`line * 0.8`), and the histogram is
// the remainder. This simplification is what the dashboard always displayed
// and is kept for behavioural compatibility; treat the signal/histogram pair
// as a smoothed echo of the line, not an independent series.

use serde::{Deserialize, Serialize};

use crate::indicators::ema::ema;

/// Damping factor standing in for the conventional 9-period signal EMA.
pub const SIGNAL_DAMPING: f64 = 0.8;

/// MACD snapshot: the line, its damped signal, and the histogram remainder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Macd {
    pub line: f64,
    pub signal: f64,
    pub histogram: f64,
}

/// Compute the MACD snapshot from `closes`.
///
/// Returns `None` when either EMA is unavailable (fewer closes than the slow
/// period, in practice).
pub fn macd(closes: &[f64], fast: usize, slow: usize, seed_from_front: bool) -> Option<Macd> {
    let fast_ema = ema(closes, fast, seed_from_front)?;
    let slow_ema = ema(closes, slow, seed_from_front)?;

    let line = fast_ema - slow_ema;
    let signal = line * SIGNAL_DAMPING;

    Some(Macd {
        line,
        signal,
        histogram: line - signal,
    })
}
