// =============================================================================
// Options Play — canned strategy suggestion per signal
// =============================================================================
//
// A fixed lookup, not an options-pricing model: the dashboard attaches one of
// five stock strategies to each call based on direction and conviction.

use serde::Serialize;

use crate::types::Signal;

/// Conviction boundary between a spread and an outright option.
const HIGH_CONVICTION: u8 = 70;

/// A named options strategy with a one-line description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OptionsPlay {
    pub strategy: &'static str,
    pub note: &'static str,
}

/// Suggest an options strategy for the signal and its confidence.
pub fn suggest(signal: Signal, confidence: u8) -> OptionsPlay {
    match (signal, confidence >= HIGH_CONVICTION) {
        (Signal::Buy, true) => OptionsPlay {
            strategy: "Long Call",
            note: "High-conviction upside; buy a near-the-money call.",
        },
        (Signal::Buy, false) => OptionsPlay {
            strategy: "Bull Call Spread",
            note: "Moderate upside; buy a call and sell a higher strike to cut premium.",
        },
        (Signal::Sell, true) => OptionsPlay {
            strategy: "Long Put",
            note: "High-conviction downside; buy a near-the-money put.",
        },
        (Signal::Sell, false) => OptionsPlay {
            strategy: "Bear Put Spread",
            note: "Moderate downside; buy a put and sell a lower strike to cut premium.",
        },
        (Signal::Hold, _) => OptionsPlay {
            strategy: "Iron Condor",
            note: "Range-bound view; sell an out-of-the-money call spread and put spread.",
        },
    }
}
