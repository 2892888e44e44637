// =============================================================================
// Evidence Scorer — weighted bullish/bearish accumulation
// =============================================================================
//
// Each rule inspects one indicator and adds its weight to the bullish or
// bearish tally, recording a human-readable reason. The bullish share of the
// total drives the directional call through an asymmetric 30/70 banding: a
// near-even split defaults to HOLD.
//
// Rules that depend on an optional indicator (trend needs the SMA, momentum
// needs MACD) are skipped entirely when the indicator is unavailable; the RSI
// and proximity rules always fire, so a tally is never empty in practice.

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::indicators::IndicatorSet;
use crate::types::Signal;

/// Accumulated evidence from one scoring pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvidenceTally {
    pub bullish: u32,
    pub bearish: u32,
    pub reasons: Vec<String>,
}

impl EvidenceTally {
    /// Bullish share of the total evidence, as a percentage.
    pub fn bullish_pct(&self) -> f64 {
        let total = self.bullish + self.bearish;
        if total == 0 {
            return 50.0;
        }
        self.bullish as f64 / total as f64 * 100.0
    }
}

/// Run every scoring rule against the indicator snapshot.
pub fn score(ind: &IndicatorSet, price: f64, cfg: &EngineConfig) -> EvidenceTally {
    let w = &cfg.weights;
    let mut tally = EvidenceTally::default();

    // RSI rule — always fires; short history reports the neutral placeholder.
    if ind.rsi < cfg.rsi_oversold {
        tally.bullish += w.rsi_extreme;
        tally.reasons.push(format!("RSI {:.1} oversold", ind.rsi));
    } else if ind.rsi > cfg.rsi_overbought {
        tally.bearish += w.rsi_extreme;
        tally.reasons.push(format!("RSI {:.1} overbought", ind.rsi));
    } else if ind.rsi > 50.0 {
        tally.bullish += w.rsi_lean;
        tally.reasons.push(format!("RSI {:.1} above midline", ind.rsi));
    } else {
        tally.bearish += w.rsi_lean;
        tally
            .reasons
            .push(format!("RSI {:.1} at or below midline", ind.rsi));
    }

    // Trend rule — skipped when the SMA is unavailable.
    if let Some(sma) = ind.sma {
        if price > sma {
            tally.bullish += w.trend;
            tally
                .reasons
                .push(format!("price above SMA-{}", cfg.sma_period));
        } else {
            tally.bearish += w.trend;
            tally
                .reasons
                .push(format!("price below SMA-{}", cfg.sma_period));
        }
    }

    // Momentum rule — skipped when MACD is unavailable.
    if let Some(ref macd) = ind.macd {
        if macd.line > macd.signal {
            tally.bullish += w.momentum;
            tally.reasons.push("MACD above signal line".to_string());
        } else {
            tally.bearish += w.momentum;
            tally
                .reasons
                .push("MACD at or below signal line".to_string());
        }
    }

    // Proximity rules — both may fire in a tight range. The comparisons are
    // one-sided, so a price beyond a level also counts as "near" it.
    if (price - ind.support) / price < cfg.proximity_band {
        tally.bullish += w.proximity;
        tally
            .reasons
            .push(format!("near support {:.2}", ind.support));
    }
    if (ind.resistance - price) / price < cfg.proximity_band {
        tally.bearish += w.proximity;
        tally
            .reasons
            .push(format!("near resistance {:.2}", ind.resistance));
    }

    tally
}

/// Map the bullish share onto the 30/70 decision banding.
pub fn decide(bullish_pct: f64, cfg: &EngineConfig) -> Signal {
    if bullish_pct > cfg.buy_threshold_pct {
        Signal::Buy
    } else if bullish_pct < cfg.sell_threshold_pct {
        Signal::Sell
    } else {
        Signal::Hold
    }
}

/// Confidence for the call, as an integer percentage.
///
/// BUY and SELL are capped (default 95) to avoid false certainty. HOLD uses
/// `50 + |50 - bullish_pct|` and is only capped when `hold_confidence_cap`
/// is set — the asymmetry is the dashboard's observed behaviour.
pub fn confidence(signal: Signal, bullish_pct: f64, cfg: &EngineConfig) -> u8 {
    let value = match signal {
        Signal::Buy => bullish_pct.min(cfg.confidence_cap),
        Signal::Sell => (100.0 - bullish_pct).min(cfg.confidence_cap),
        Signal::Hold => {
            let raw = 50.0 + (50.0 - bullish_pct).abs();
            match cfg.hold_confidence_cap {
                Some(cap) => raw.min(cap),
                None => raw,
            }
        }
    };
    value.round().clamp(0.0, 100.0) as u8
}
