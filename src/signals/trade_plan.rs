// =============================================================================
// Trade Plan — entry, stop and targets by direction
// =============================================================================
//
// Levels are built from the last close with the configured multipliers. Stops
// and the furthest target are bounded by the support/resistance levels (padded
// by the guard fraction) so a plan never reaches far through a known level.

use serde::{Deserialize, Serialize};

use crate::config::TradeLevelParams;
use crate::types::Signal;

/// Price levels for acting on a signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradePlan {
    pub entry: f64,
    pub stop_loss: f64,
    /// Nearest target first: ascending for BUY, descending for SELL, a single
    /// level for HOLD.
    pub targets: Vec<f64>,
    /// Reward at the first target per unit of risk, rounded to one decimal.
    pub risk_reward: f64,
}

/// Build the plan for `signal` around `price`.
pub fn build(
    signal: Signal,
    price: f64,
    support: f64,
    resistance: f64,
    p: &TradeLevelParams,
) -> TradePlan {
    let (entry, stop_loss, targets) = match signal {
        Signal::Buy => {
            let entry = price * (1.0 + p.entry_pad);
            let stop = (price * (1.0 - p.stop_pct)).max(support * (1.0 - p.level_guard_pct));
            let targets = vec![
                price * (1.0 + p.target_steps[0]),
                price * (1.0 + p.target_steps[1]),
                (price * (1.0 + p.target_steps[2])).min(resistance * (1.0 - p.level_guard_pct)),
            ];
            (entry, stop, targets)
        }
        Signal::Sell => {
            let entry = price * (1.0 - p.entry_pad);
            let stop = (price * (1.0 + p.stop_pct)).min(resistance * (1.0 + p.level_guard_pct));
            let targets = vec![
                price * (1.0 - p.target_steps[0]),
                price * (1.0 - p.target_steps[1]),
                (price * (1.0 - p.target_steps[2])).max(support * (1.0 + p.level_guard_pct)),
            ];
            (entry, stop, targets)
        }
        Signal::Hold => (
            price,
            price * (1.0 - p.hold_stop_pct),
            vec![price * (1.0 + p.hold_target_pct)],
        ),
    };

    let risk = (entry - stop_loss).abs();
    let reward = targets.first().map(|t| (t - entry).abs()).unwrap_or(0.0);
    let risk_reward = if risk > 0.0 {
        round1(reward / risk)
    } else {
        0.0
    };

    TradePlan {
        entry,
        stop_loss,
        targets,
        risk_reward,
    }
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buy_plan_levels() {
        let p = TradeLevelParams::default();
        let plan = build(Signal::Buy, 100.0, 95.0, 105.0, &p);

        assert!((plan.entry - 100.2).abs() < 1e-10);
        // max(98.5, 94.525) = 98.5
        assert!((plan.stop_loss - 98.5).abs() < 1e-10);
        assert!((plan.targets[0] - 102.0).abs() < 1e-10);
        assert!((plan.targets[1] - 103.5).abs() < 1e-10);
        // min(105.0, 104.475) = 104.475
        assert!((plan.targets[2] - 104.475).abs() < 1e-10);
        // |102 - 100.2| / |100.2 - 98.5| = 1.8 / 1.7 -> 1.1
        assert!((plan.risk_reward - 1.1).abs() < 1e-10);
    }

    #[test]
    fn sell_plan_mirrors_buy() {
        let p = TradeLevelParams::default();
        let plan = build(Signal::Sell, 100.0, 95.0, 105.0, &p);

        assert!((plan.entry - 99.8).abs() < 1e-10);
        // min(101.5, 105.525) = 101.5
        assert!((plan.stop_loss - 101.5).abs() < 1e-10);
        assert!((plan.targets[0] - 98.0).abs() < 1e-10);
        assert!((plan.targets[1] - 96.5).abs() < 1e-10);
        // max(95.0, 95.475) = 95.475
        assert!((plan.targets[2] - 95.475).abs() < 1e-10);
        assert!((plan.risk_reward - 1.1).abs() < 1e-10);
    }

    #[test]
    fn hold_plan_single_target() {
        let p = TradeLevelParams::default();
        let plan = build(Signal::Hold, 100.0, 95.0, 105.0, &p);

        assert!((plan.entry - 100.0).abs() < 1e-10);
        assert!((plan.stop_loss - 98.5).abs() < 1e-10);
        assert_eq!(plan.targets.len(), 1);
        assert!((plan.targets[0] - 101.5).abs() < 1e-10);
        assert!((plan.risk_reward - 1.0).abs() < 1e-10);
    }

    #[test]
    fn nearby_support_tightens_buy_stop() {
        let p = TradeLevelParams::default();
        // Support just under the price lifts the stop above the raw 1.5 %.
        let plan = build(Signal::Buy, 100.0, 99.5, 110.0, &p);
        assert!((plan.stop_loss - 99.0025).abs() < 1e-10);
    }

    #[test]
    fn buy_targets_ascending() {
        let p = TradeLevelParams::default();
        let plan = build(Signal::Buy, 100.0, 90.0, 120.0, &p);
        assert!(plan.targets[0] < plan.targets[1]);
        assert!(plan.targets[1] < plan.targets[2]);
    }

    #[test]
    fn sell_targets_descending() {
        let p = TradeLevelParams::default();
        let plan = build(Signal::Sell, 100.0, 80.0, 110.0, &p);
        assert!(plan.targets[0] > plan.targets[1]);
        assert!(plan.targets[1] > plan.targets[2]);
    }

    #[test]
    fn degenerate_risk_yields_zero_ratio() {
        let mut p = TradeLevelParams::default();
        p.hold_stop_pct = 0.0;
        let plan = build(Signal::Hold, 100.0, 95.0, 105.0, &p);
        assert!((plan.risk_reward - 0.0).abs() < 1e-10);
    }
}
