// =============================================================================
// Synthetic Feed — random-walk OHLCV generator
// =============================================================================
//
// Stands in for a live venue: a per-symbol base-price table and a bounded
// random walk (close moves at most +/-2 % per bar, open/high/low jittered
// around it, prices rounded to the paise). The jitter bounds guarantee the
// OHLC range invariant by construction. The engine downstream is agnostic to
// where bars come from, so this feed and a real adapter are interchangeable.

use chrono::{DateTime, Duration, Utc};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::types::Bar;

/// Reference price for known NSE symbols; anything else starts at 1000.
pub fn base_price(symbol: &str) -> f64 {
    match symbol {
        "NIFTY" => 21_500.0,
        "BANKNIFTY" => 46_000.0,
        "RELIANCE" => 2_800.0,
        "TCS" => 3_600.0,
        "INFY" => 1_650.0,
        "HDFCBANK" => 1_600.0,
        "ICICIBANK" => 950.0,
        "ITC" => 450.0,
        "HINDUNILVR" => 2_650.0,
        "BHARTIARTL" => 900.0,
        _ => 1_000.0,
    }
}

pub struct SyntheticFeed {
    rng: StdRng,
}

impl SyntheticFeed {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic feed for tests.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// One step of the walk from `prev_close`.
    pub fn next_bar(&mut self, prev_close: f64, timestamp: DateTime<Utc>) -> Bar {
        let change = self.rng.gen_range(-0.02..0.02);
        let close = round_paise(prev_close * (1.0 + change));

        let open = round_paise(close * self.rng.gen_range(0.999..1.001));
        let high = round_paise(close * self.rng.gen_range(1.001..1.02));
        let low = round_paise(close * self.rng.gen_range(0.98..0.999));
        let volume = self.rng.gen_range(10_000..=1_000_000);

        Bar {
            timestamp,
            open,
            high: high.max(open).max(close),
            low: low.min(open).min(close),
            close,
            volume,
        }
    }

    /// Generate `count` one-minute bars ending at `end`, oldest-first,
    /// walking forward from the symbol's base price.
    pub fn history(&mut self, symbol: &str, count: usize, end: DateTime<Utc>) -> Vec<Bar> {
        let mut bars = Vec::with_capacity(count);
        let mut close = base_price(symbol);

        for i in 0..count {
            let offset = (count - 1 - i) as i64;
            let bar = self.next_bar(close, end - Duration::minutes(offset));
            close = bar.close;
            bars.push(bar);
        }

        bars
    }
}

impl Default for SyntheticFeed {
    fn default() -> Self {
        Self::new()
    }
}

fn round_paise(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
