// =============================================================================
// Application State — shared across API handlers and background loops
// =============================================================================
//
// Everything behind the Arc: the hot-editable runtime config, the bar store,
// the risk engine, and the latest analysis per symbol. A monotonically
// increasing state version lets WebSocket clients poll cheaply for changes.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use serde::Serialize;

use crate::analysis::AnalysisRecord;
use crate::config::RuntimeConfig;
use crate::market_data::BarStore;
use crate::market_hours;
use crate::risk::RiskEngine;

pub struct AppState {
    pub runtime_config: RwLock<RuntimeConfig>,
    pub bar_store: BarStore,
    pub risk_engine: RiskEngine,
    latest_analyses: RwLock<HashMap<String, AnalysisRecord>>,
    state_version: AtomicU64,
}

/// Full state snapshot pushed to WebSocket clients and the dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct StateSnapshot {
    pub state_version: u64,
    pub server_time: i64,
    pub market_open: bool,
    pub symbols: Vec<String>,
    pub analyses: Vec<AnalysisRecord>,
}

impl AppState {
    pub fn new(config: RuntimeConfig) -> Self {
        let bar_store = BarStore::new(config.max_bars);
        Self {
            runtime_config: RwLock::new(config),
            bar_store,
            risk_engine: RiskEngine::new(),
            latest_analyses: RwLock::new(HashMap::new()),
            state_version: AtomicU64::new(1),
        }
    }

    pub fn increment_version(&self) {
        self.state_version.fetch_add(1, Ordering::Relaxed);
    }

    pub fn current_state_version(&self) -> u64 {
        self.state_version.load(Ordering::Relaxed)
    }

    /// Store the newest analysis for its symbol.
    pub fn record_analysis(&self, record: AnalysisRecord) {
        self.latest_analyses
            .write()
            .insert(record.symbol.clone(), record);
    }

    /// Latest analysis for one symbol, if any.
    pub fn latest_analysis(&self, symbol: &str) -> Option<AnalysisRecord> {
        self.latest_analyses.read().get(symbol).cloned()
    }

    /// Latest analysis for every symbol, sorted by symbol for stable output.
    pub fn all_analyses(&self) -> Vec<AnalysisRecord> {
        let mut records: Vec<AnalysisRecord> =
            self.latest_analyses.read().values().cloned().collect();
        records.sort_by(|a, b| a.symbol.cmp(&b.symbol));
        records
    }

    pub fn build_snapshot(&self) -> StateSnapshot {
        let now = chrono::Utc::now();
        StateSnapshot {
            state_version: self.current_state_version(),
            server_time: now.timestamp_millis(),
            market_open: market_hours::is_open(now),
            symbols: self.runtime_config.read().symbols.clone(),
            analyses: self.all_analyses(),
        }
    }
}
