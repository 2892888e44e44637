// =============================================================================
// Analysis Engine — pure facade over indicators + signals
// =============================================================================
//
// One synchronous pass: gather closes, compute the indicator snapshot, score
// it, build the trade plan. No I/O, no shared state, no suspension points;
// safe to call concurrently and bit-identical for identical inputs. Short
// history degrades per-indicator inside the snapshot; only an empty window is
// an error, because no signal can be computed at all.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::EngineConfig;
use crate::indicators::IndicatorSet;
use crate::signals::{self, SignalResult};
use crate::types::Bar;

/// The engine's only failure mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// Zero bars were supplied; there is nothing to analyse.
    #[error("insufficient data")]
    InsufficientData,
}

/// Indicator snapshot plus the signal derived from it. Callers display both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub indicators: IndicatorSet,
    pub signal: SignalResult,
}

/// Analyse a window of bars (oldest-first).
pub fn analyze(bars: &[Bar], cfg: &EngineConfig) -> Result<Analysis, AnalysisError> {
    let last = bars.last().ok_or(AnalysisError::InsufficientData)?;
    let indicators =
        IndicatorSet::compute(bars, cfg).ok_or(AnalysisError::InsufficientData)?;

    let signal = signals::generate(&indicators, last.close, cfg);

    Ok(Analysis { indicators, signal })
}
