// =============================================================================
// BarStore — thread-safe ring buffer of recent bars per symbol
// =============================================================================
//
// The caller-owned cache between the data source and the pure engine: the
// engine itself never holds bar state. Reads return oldest-first windows;
// writes trim the ring to `max_bars`. A bar arriving with the same timestamp
// as the newest entry replaces it, keeping the no-duplicate-timestamp
// invariant.

use std::collections::{HashMap, VecDeque};

use parking_lot::RwLock;

use crate::types::Bar;

pub struct BarStore {
    buffers: RwLock<HashMap<String, VecDeque<Bar>>>,
    max_bars: usize,
}

impl BarStore {
    /// Create a store retaining at most `max_bars` bars per symbol.
    pub fn new(max_bars: usize) -> Self {
        Self {
            buffers: RwLock::new(HashMap::new()),
            max_bars,
        }
    }

    /// Append a bar for `symbol`, replacing the newest entry when the
    /// timestamp repeats, then trim the ring.
    pub fn push(&self, symbol: &str, bar: Bar) {
        let mut map = self.buffers.write();
        let ring = map
            .entry(symbol.to_string())
            .or_insert_with(|| VecDeque::with_capacity(self.max_bars + 1));

        if let Some(last) = ring.back() {
            if last.timestamp == bar.timestamp {
                ring.pop_back();
            }
        }
        ring.push_back(bar);

        while ring.len() > self.max_bars {
            ring.pop_front();
        }
    }

    /// Append a whole batch (oldest-first) for `symbol`.
    pub fn extend(&self, symbol: &str, bars: impl IntoIterator<Item = Bar>) {
        for bar in bars {
            self.push(symbol, bar);
        }
    }

    /// The most recent `count` bars for `symbol`, oldest-first.
    pub fn recent(&self, symbol: &str, count: usize) -> Vec<Bar> {
        let map = self.buffers.read();
        match map.get(symbol) {
            Some(ring) => {
                let start = ring.len().saturating_sub(count);
                ring.iter().skip(start).cloned().collect()
            }
            None => Vec::new(),
        }
    }

    /// Every stored bar for `symbol`, oldest-first.
    pub fn all(&self, symbol: &str) -> Vec<Bar> {
        let map = self.buffers.read();
        map.get(symbol)
            .map(|ring| ring.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// The newest close for `symbol`, if any bars exist.
    pub fn last_close(&self, symbol: &str) -> Option<f64> {
        let map = self.buffers.read();
        map.get(symbol).and_then(|ring| ring.back()).map(|b| b.close)
    }

    /// Number of bars stored for `symbol`.
    pub fn len(&self, symbol: &str) -> usize {
        let map = self.buffers.read();
        map.get(symbol).map(|ring| ring.len()).unwrap_or(0)
    }

    /// Whether the store has seen `symbol` at all.
    pub fn contains(&self, symbol: &str) -> bool {
        self.buffers.read().contains_key(symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn bar(minute: i64, close: f64) -> Bar {
        let start = Utc.with_ymd_and_hms(2024, 1, 2, 9, 15, 0).unwrap();
        Bar {
            timestamp: start + Duration::minutes(minute),
            open: close,
            high: close,
            low: close,
            close,
            volume: 100,
        }
    }

    #[test]
    fn push_and_read_back_in_order() {
        let store = BarStore::new(10);
        store.push("NIFTY", bar(0, 100.0));
        store.push("NIFTY", bar(1, 101.0));
        store.push("NIFTY", bar(2, 102.0));

        let bars = store.all("NIFTY");
        assert_eq!(bars.len(), 3);
        assert!((bars[0].close - 100.0).abs() < 1e-10);
        assert!((bars[2].close - 102.0).abs() < 1e-10);
    }

    #[test]
    fn ring_trims_to_max() {
        let store = BarStore::new(3);
        for i in 0..6 {
            store.push("TCS", bar(i, 100.0 + i as f64));
        }
        let bars = store.all("TCS");
        assert_eq!(bars.len(), 3);
        assert!((bars[0].close - 103.0).abs() < 1e-10);
        assert!((bars[2].close - 105.0).abs() < 1e-10);
    }

    #[test]
    fn duplicate_timestamp_replaces_newest() {
        let store = BarStore::new(10);
        store.push("INFY", bar(0, 100.0));
        store.push("INFY", bar(0, 105.0));
        let bars = store.all("INFY");
        assert_eq!(bars.len(), 1);
        assert!((bars[0].close - 105.0).abs() < 1e-10);
    }

    #[test]
    fn recent_takes_trailing_window() {
        let store = BarStore::new(10);
        for i in 0..5 {
            store.push("ITC", bar(i, 10.0 + i as f64));
        }
        let bars = store.recent("ITC", 2);
        assert_eq!(bars.len(), 2);
        assert!((bars[0].close - 13.0).abs() < 1e-10);
        assert!((bars[1].close - 14.0).abs() < 1e-10);
    }

    #[test]
    fn unknown_symbol_is_empty() {
        let store = BarStore::new(10);
        assert!(store.all("MISSING").is_empty());
        assert!(store.last_close("MISSING").is_none());
        assert_eq!(store.len("MISSING"), 0);
        assert!(!store.contains("MISSING"));
    }

    #[test]
    fn last_close_tracks_newest() {
        let store = BarStore::new(10);
        store.extend("RELIANCE", (0..3).map(|i| bar(i, 2800.0 + i as f64)));
        assert!((store.last_close("RELIANCE").unwrap() - 2802.0).abs() < 1e-10);
    }
}
