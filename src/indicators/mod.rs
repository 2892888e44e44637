// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Pure, side-effect-free implementations of the indicators behind the signal
// engine. Optional indicators return `Option<T>` so callers are forced to
// handle insufficient-data scenarios; the rest degrade to documented neutral
// sentinels. Nothing in this module ever panics on short history.

pub mod bollinger;
pub mod ema;
pub mod levels;
pub mod macd;
pub mod rsi;
pub mod sma;
pub mod volume;

pub use bollinger::{bollinger, BollingerBands};
pub use ema::ema;
pub use levels::{support_resistance, Levels};
pub use macd::{macd, Macd};
pub use rsi::rsi;
pub use sma::sma;
pub use volume::average_volume;

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::types::Bar;

/// Read-only indicator snapshot computed fresh from a window of bars.
///
/// No incremental state is retained between calls; each invocation is pure
/// given its input window. Optional fields are absent (not zero) when the
/// window is shorter than their look-back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSet {
    pub rsi: f64,
    pub sma: Option<f64>,
    pub ema: Option<f64>,
    pub macd: Option<Macd>,
    pub bollinger: Option<BollingerBands>,
    pub support: f64,
    pub resistance: f64,
    pub avg_volume: f64,
}

impl IndicatorSet {
    /// Compute the full snapshot from `bars` (oldest-first).
    ///
    /// Returns `None` only for an empty window — every other shortfall
    /// degrades per-indicator.
    pub fn compute(bars: &[Bar], cfg: &EngineConfig) -> Option<Self> {
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let volumes: Vec<u64> = bars.iter().map(|b| b.volume).collect();

        let levels = support_resistance(&closes, cfg.sr_window)?;

        Some(Self {
            rsi: rsi(&closes, cfg.rsi_period),
            sma: sma(&closes, cfg.sma_period),
            ema: ema(&closes, cfg.ema_period, cfg.ema_seed_from_front),
            macd: macd(
                &closes,
                cfg.macd_fast,
                cfg.macd_slow,
                cfg.ema_seed_from_front,
            ),
            bollinger: bollinger(&closes, cfg.bb_period, cfg.bb_k),
            support: levels.support,
            resistance: levels.resistance,
            avg_volume: average_volume(&volumes, cfg.volume_period),
        })
    }
}
