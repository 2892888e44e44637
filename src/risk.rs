// =============================================================================
// Risk Engine — trade validation and position sizing
// =============================================================================
//
// Applies the desk-wide limits to a generated signal before it is presented
// as actionable:
//   1. Stop distance     — warn when tighter than 0.5 % or wider than 5 %.
//   2. Risk/reward       — reject below the minimum ratio.
//   3. Position share    — reject when the position exceeds 20 % of the
//                          portfolio.
//   4. Daily risk        — reject when the risked amount exceeds the
//                          profile's daily limit.
//   5. Shorting          — reject SELL ideas when the profile disallows them.
//   6. Confidence        — warn (not reject) below 60.
//
// Sizing risks the profile's daily budget scaled by confidence, capped by
// the maximum portfolio share, minimum one share.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::RiskProfile;
use crate::signals::SignalResult;
use crate::types::Signal;

/// Outcome of validating one signal against a risk profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeValidation {
    pub is_valid: bool,
    pub warnings: Vec<String>,
}

pub struct RiskEngine {
    /// Minimum acceptable reward per unit of risk.
    min_risk_reward: f64,
    /// Maximum share of the portfolio in a single position.
    max_position_share: f64,
    /// Stop distances outside this band draw a warning (percent of entry).
    stop_band_pct: (f64, f64),
    /// Confidence below this draws a warning.
    min_confidence: u8,
}

impl RiskEngine {
    pub fn new() -> Self {
        Self {
            min_risk_reward: 1.5,
            max_position_share: 0.20,
            stop_band_pct: (0.5, 5.0),
            min_confidence: 60,
        }
    }

    /// Validate `result` sized at `shares` against `profile`.
    pub fn validate(
        &self,
        result: &SignalResult,
        shares: u64,
        profile: &RiskProfile,
    ) -> TradeValidation {
        let mut warnings = Vec::new();
        let mut is_valid = true;

        // 1. Stop distance band.
        if result.entry > 0.0 {
            let stop_pct = (result.entry - result.stop_loss).abs() / result.entry * 100.0;
            if stop_pct < self.stop_band_pct.0 {
                warnings.push(format!(
                    "stop loss too tight ({stop_pct:.2}% < {}%), may get stopped out prematurely",
                    self.stop_band_pct.0
                ));
            } else if stop_pct > self.stop_band_pct.1 {
                warnings.push(format!(
                    "stop loss too wide ({stop_pct:.2}% > {}%), excessive risk per trade",
                    self.stop_band_pct.1
                ));
            }
        }

        // 2. Risk/reward floor.
        if result.risk_reward < self.min_risk_reward {
            warnings.push(format!(
                "risk/reward {:.1} below minimum {:.1}",
                result.risk_reward, self.min_risk_reward
            ));
            is_valid = false;
        }

        // 3. Position share cap.
        let position_value = shares as f64 * result.entry;
        if profile.portfolio_value > 0.0 {
            let share = position_value / profile.portfolio_value;
            if share > self.max_position_share {
                warnings.push(format!(
                    "position size {:.1}% exceeds maximum {:.0}%",
                    share * 100.0,
                    self.max_position_share * 100.0
                ));
                is_valid = false;
            }

            // 4. Daily risk cap.
            let risk_amount = shares as f64 * (result.entry - result.stop_loss).abs();
            let risk_pct = risk_amount / profile.portfolio_value * 100.0;
            if risk_pct > profile.max_daily_risk_pct {
                warnings.push(format!(
                    "trade risk {risk_pct:.1}% exceeds daily limit {:.1}%",
                    profile.max_daily_risk_pct
                ));
                is_valid = false;
            }
        }

        // 5. Shorting permission.
        if result.signal == Signal::Sell && !profile.allow_shorting {
            warnings.push("shorting disabled in risk profile".to_string());
            is_valid = false;
        }

        // 6. Confidence advisory.
        if result.confidence < self.min_confidence {
            warnings.push(format!(
                "low confidence ({} < {}), consider reducing position size",
                result.confidence, self.min_confidence
            ));
        }

        debug!(
            signal = %result.signal,
            shares,
            is_valid,
            warning_count = warnings.len(),
            "trade validation complete"
        );

        TradeValidation { is_valid, warnings }
    }

    /// Shares to buy/sell so the risked amount stays inside the profile's
    /// daily budget, scaled down by confidence and capped by the maximum
    /// portfolio share. Never less than one share.
    pub fn position_size(
        &self,
        entry: f64,
        stop_loss: f64,
        profile: &RiskProfile,
        confidence: u8,
    ) -> u64 {
        let risk_per_share = (entry - stop_loss).abs();
        if risk_per_share <= 0.0 || entry <= 0.0 {
            return 1;
        }

        let base_risk = profile.portfolio_value * (profile.max_daily_risk_pct / 100.0);
        let adjusted_risk = base_risk * (confidence as f64 / 100.0);

        let by_risk = (adjusted_risk / risk_per_share) as u64;
        let by_share = (profile.portfolio_value * self.max_position_share / entry) as u64;

        by_risk.min(by_share).max(1)
    }
}

impl Default for RiskEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RiskLevel;

    fn result(signal: Signal, entry: f64, stop: f64, rr: f64, confidence: u8) -> SignalResult {
        SignalResult {
            signal,
            confidence,
            entry,
            stop_loss: stop,
            targets: vec![entry * 1.02],
            risk_reward: rr,
            reasoning: Vec::new(),
            risk_level: RiskLevel::Medium,
            bullish: 5,
            bearish: 2,
        }
    }

    #[test]
    fn healthy_trade_passes() {
        let engine = RiskEngine::new();
        let profile = RiskProfile::default();
        // 1.5 % stop, rr 2.0, 70 confidence, tiny position.
        let r = result(Signal::Buy, 100.0, 98.5, 2.0, 70);
        let v = engine.validate(&r, 10, &profile);
        assert!(v.is_valid, "warnings: {:?}", v.warnings);
        assert!(v.warnings.is_empty());
    }

    #[test]
    fn low_risk_reward_rejects() {
        let engine = RiskEngine::new();
        let profile = RiskProfile::default();
        let r = result(Signal::Buy, 100.0, 98.5, 1.0, 70);
        let v = engine.validate(&r, 10, &profile);
        assert!(!v.is_valid);
        assert!(v.warnings.iter().any(|w| w.contains("risk/reward")));
    }

    #[test]
    fn tight_stop_warns_but_passes() {
        let engine = RiskEngine::new();
        let profile = RiskProfile::default();
        let r = result(Signal::Buy, 100.0, 99.8, 2.0, 70);
        let v = engine.validate(&r, 10, &profile);
        assert!(v.is_valid);
        assert!(v.warnings.iter().any(|w| w.contains("too tight")));
    }

    #[test]
    fn wide_stop_warns() {
        let engine = RiskEngine::new();
        let profile = RiskProfile::default();
        let r = result(Signal::Buy, 100.0, 90.0, 2.0, 70);
        let v = engine.validate(&r, 1, &profile);
        assert!(v.warnings.iter().any(|w| w.contains("too wide")));
    }

    #[test]
    fn oversized_position_rejects() {
        let engine = RiskEngine::new();
        let profile = RiskProfile::default();
        // 300 shares * 100 = 30 % of a 100k portfolio.
        let r = result(Signal::Buy, 100.0, 98.5, 2.0, 70);
        let v = engine.validate(&r, 300, &profile);
        assert!(!v.is_valid);
        assert!(v.warnings.iter().any(|w| w.contains("position size")));
    }

    #[test]
    fn daily_risk_cap_rejects() {
        let engine = RiskEngine::new();
        let mut profile = RiskProfile::default();
        profile.max_daily_risk_pct = 0.1;
        // 100 shares risking 1.5 each = 150 = 0.15 % of 100k.
        let r = result(Signal::Buy, 100.0, 98.5, 2.0, 70);
        let v = engine.validate(&r, 100, &profile);
        assert!(!v.is_valid);
        assert!(v.warnings.iter().any(|w| w.contains("daily limit")));
    }

    #[test]
    fn shorting_disabled_rejects_sell() {
        let engine = RiskEngine::new();
        let mut profile = RiskProfile::default();
        profile.allow_shorting = false;
        let r = result(Signal::Sell, 100.0, 101.5, 2.0, 70);
        let v = engine.validate(&r, 10, &profile);
        assert!(!v.is_valid);
        assert!(v.warnings.iter().any(|w| w.contains("shorting")));
    }

    #[test]
    fn low_confidence_warns_only() {
        let engine = RiskEngine::new();
        let profile = RiskProfile::default();
        let r = result(Signal::Buy, 100.0, 98.5, 2.0, 40);
        let v = engine.validate(&r, 10, &profile);
        assert!(v.is_valid);
        assert!(v.warnings.iter().any(|w| w.contains("low confidence")));
    }

    #[test]
    fn position_size_scales_with_confidence() {
        let engine = RiskEngine::new();
        let profile = RiskProfile::default();
        // Full budget: 2 % of 100k = 2000; risk/share 20.
        let full = engine.position_size(100.0, 80.0, &profile, 100);
        let half = engine.position_size(100.0, 80.0, &profile, 50);
        assert_eq!(full, 100);
        assert_eq!(half, 50);
    }

    #[test]
    fn position_size_caps_at_portfolio_share() {
        let engine = RiskEngine::new();
        let mut profile = RiskProfile::default();
        profile.max_daily_risk_pct = 50.0;
        // Uncapped sizing would dwarf the 20 % share limit.
        let shares = engine.position_size(100.0, 99.9, &profile, 100);
        assert_eq!(shares, 200);
    }

    #[test]
    fn position_size_floor_is_one_share() {
        let engine = RiskEngine::new();
        let profile = RiskProfile::default();
        assert_eq!(engine.position_size(100.0, 100.0, &profile, 80), 1);
    }
}
