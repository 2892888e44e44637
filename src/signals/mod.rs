// =============================================================================
// Signals Module
// =============================================================================
//
// Turns an indicator snapshot plus the current price into a directional call:
// - Evidence scorer (weighted bullish/bearish tallies, 30/70 banding)
// - Trade plan (entry, stop, targets, risk/reward)
// - Canned options-strategy suggestion

pub mod options;
pub mod scorer;
pub mod trade_plan;

pub use options::{suggest as suggest_options, OptionsPlay};
pub use scorer::{confidence, decide, score, EvidenceTally};
pub use trade_plan::{build as build_trade_plan, TradePlan};

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::indicators::IndicatorSet;
use crate::types::{RiskLevel, Signal};

/// Complete output of one signal pass. Immutable once returned; each call is
/// independent of every other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalResult {
    pub signal: Signal,
    /// Integer percentage in [0, 100].
    pub confidence: u8,
    pub entry: f64,
    pub stop_loss: f64,
    pub targets: Vec<f64>,
    pub risk_reward: f64,
    pub reasoning: Vec<String>,
    pub risk_level: RiskLevel,
    /// Raw evidence tallies behind the call, kept for auditability.
    pub bullish: u32,
    pub bearish: u32,
}

/// Score the snapshot and assemble the full result.
pub fn generate(ind: &IndicatorSet, price: f64, cfg: &EngineConfig) -> SignalResult {
    let tally = score(ind, price, cfg);
    let bullish_pct = tally.bullish_pct();

    let signal = decide(bullish_pct, cfg);
    let confidence = confidence(signal, bullish_pct, cfg);
    let plan = build_trade_plan(signal, price, ind.support, ind.resistance, &cfg.levels);

    let risk_level = match signal {
        Signal::Buy | Signal::Sell => RiskLevel::Medium,
        Signal::Hold => RiskLevel::Low,
    };

    SignalResult {
        signal,
        confidence,
        entry: plan.entry,
        stop_loss: plan.stop_loss,
        targets: plan.targets,
        risk_reward: plan.risk_reward,
        reasoning: tally.reasons,
        risk_level,
        bullish: tally.bullish,
        bearish: tally.bearish,
    }
}
