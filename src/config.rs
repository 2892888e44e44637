// =============================================================================
// Runtime Configuration — hot-editable desk settings with atomic save
// =============================================================================
//
// Central configuration hub for the Meridian desk. Every tunable parameter
// lives here so the service can be reconfigured at runtime without a restart,
// and so the engine's scoring weights and price multipliers are named values
// a test can assert on instead of scattered literals.
//
// Persistence uses an atomic tmp + rename pattern to prevent corruption on
// crash. All fields carry `#[serde(default)]` so that adding new fields
// never breaks loading an older config file.
// =============================================================================

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

/// On-disk location of the runtime config.
pub const CONFIG_FILE: &str = "meridian_config.json";

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_true() -> bool {
    true
}

fn default_symbols() -> Vec<String> {
    [
        "NIFTY",
        "BANKNIFTY",
        "RELIANCE",
        "TCS",
        "INFY",
        "HDFCBANK",
        "ICICIBANK",
        "ITC",
        "HINDUNILVR",
        "BHARTIARTL",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_max_bars() -> usize {
    500
}

fn default_history_bars() -> usize {
    120
}

fn default_refresh_interval_secs() -> u64 {
    5
}

fn default_rsi_period() -> usize {
    14
}

fn default_sma_period() -> usize {
    20
}

fn default_ema_period() -> usize {
    20
}

fn default_macd_fast() -> usize {
    12
}

fn default_macd_slow() -> usize {
    26
}

fn default_bb_period() -> usize {
    20
}

fn default_bb_k() -> f64 {
    2.0
}

fn default_sr_window() -> usize {
    50
}

fn default_volume_period() -> usize {
    20
}

fn default_rsi_oversold() -> f64 {
    30.0
}

fn default_rsi_overbought() -> f64 {
    70.0
}

fn default_proximity_band() -> f64 {
    0.01
}

fn default_buy_threshold_pct() -> f64 {
    70.0
}

fn default_sell_threshold_pct() -> f64 {
    30.0
}

fn default_confidence_cap() -> f64 {
    95.0
}

fn default_rsi_extreme_weight() -> u32 {
    3
}

fn default_rsi_lean_weight() -> u32 {
    1
}

fn default_trend_weight() -> u32 {
    2
}

fn default_momentum_weight() -> u32 {
    2
}

fn default_proximity_weight() -> u32 {
    2
}

fn default_entry_pad() -> f64 {
    0.002
}

fn default_stop_pct() -> f64 {
    0.015
}

fn default_level_guard_pct() -> f64 {
    0.005
}

fn default_target_steps() -> [f64; 3] {
    [0.02, 0.035, 0.05]
}

fn default_hold_stop_pct() -> f64 {
    0.015
}

fn default_hold_target_pct() -> f64 {
    0.015
}

fn default_max_daily_risk_pct() -> f64 {
    2.0
}

fn default_portfolio_value() -> f64 {
    100_000.0
}

// =============================================================================
// ScoreWeights
// =============================================================================

/// Evidence weights for the signal scorer. One named field per rule so the
/// weight table can be audited and overridden as a unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    /// RSI beyond the oversold/overbought band.
    #[serde(default = "default_rsi_extreme_weight")]
    pub rsi_extreme: u32,

    /// RSI merely leaning above/below the midline.
    #[serde(default = "default_rsi_lean_weight")]
    pub rsi_lean: u32,

    /// Price relative to the trend SMA.
    #[serde(default = "default_trend_weight")]
    pub trend: u32,

    /// MACD line relative to its signal line.
    #[serde(default = "default_momentum_weight")]
    pub momentum: u32,

    /// Price within the proximity band of support/resistance.
    #[serde(default = "default_proximity_weight")]
    pub proximity: u32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            rsi_extreme: default_rsi_extreme_weight(),
            rsi_lean: default_rsi_lean_weight(),
            trend: default_trend_weight(),
            momentum: default_momentum_weight(),
            proximity: default_proximity_weight(),
        }
    }
}

// =============================================================================
// TradeLevelParams
// =============================================================================

/// Multipliers for entry/stop/target construction. All values are fractions
/// of price (0.002 = 0.2 %). Defaults reproduce the dashboard's levels
/// exactly; they are tuning knobs, not structural constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeLevelParams {
    /// Entry slippage pad beyond the last close (added for BUY, subtracted
    /// for SELL).
    #[serde(default = "default_entry_pad")]
    pub entry_pad: f64,

    /// Stop-loss distance from the last close.
    #[serde(default = "default_stop_pct")]
    pub stop_pct: f64,

    /// Pad applied to support/resistance when they bound a stop or final
    /// target.
    #[serde(default = "default_level_guard_pct")]
    pub level_guard_pct: f64,

    /// Profit-target distances, nearest first.
    #[serde(default = "default_target_steps")]
    pub target_steps: [f64; 3],

    /// Stop distance for a HOLD call.
    #[serde(default = "default_hold_stop_pct")]
    pub hold_stop_pct: f64,

    /// Single target distance for a HOLD call.
    #[serde(default = "default_hold_target_pct")]
    pub hold_target_pct: f64,
}

impl Default for TradeLevelParams {
    fn default() -> Self {
        Self {
            entry_pad: default_entry_pad(),
            stop_pct: default_stop_pct(),
            level_guard_pct: default_level_guard_pct(),
            target_steps: default_target_steps(),
            hold_stop_pct: default_hold_stop_pct(),
            hold_target_pct: default_hold_target_pct(),
        }
    }
}

// =============================================================================
// EngineConfig
// =============================================================================

/// The complete knob set for one analysis pass: indicator look-backs, scoring
/// weights and thresholds, and trade-level multipliers. The engine takes this
/// by reference and keeps no state of its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    // --- Indicator look-backs ------------------------------------------------
    #[serde(default = "default_rsi_period")]
    pub rsi_period: usize,

    #[serde(default = "default_sma_period")]
    pub sma_period: usize,

    #[serde(default = "default_ema_period")]
    pub ema_period: usize,

    #[serde(default = "default_macd_fast")]
    pub macd_fast: usize,

    #[serde(default = "default_macd_slow")]
    pub macd_slow: usize,

    #[serde(default = "default_bb_period")]
    pub bb_period: usize,

    /// Bollinger band width in standard deviations.
    #[serde(default = "default_bb_k")]
    pub bb_k: f64,

    /// Close window for the support/resistance percentile proxy.
    #[serde(default = "default_sr_window")]
    pub sr_window: usize,

    #[serde(default = "default_volume_period")]
    pub volume_period: usize,

    /// Seed the EMA warm-up from the front of the series (legacy behaviour).
    /// When false, the warm-up is restricted to the trailing `2 * period`
    /// closes.
    #[serde(default = "default_true")]
    pub ema_seed_from_front: bool,

    // --- Scoring thresholds --------------------------------------------------
    #[serde(default = "default_rsi_oversold")]
    pub rsi_oversold: f64,

    #[serde(default = "default_rsi_overbought")]
    pub rsi_overbought: f64,

    /// Relative distance under which a level counts as "near".
    #[serde(default = "default_proximity_band")]
    pub proximity_band: f64,

    /// Bullish share above which the call is BUY.
    #[serde(default = "default_buy_threshold_pct")]
    pub buy_threshold_pct: f64,

    /// Bullish share below which the call is SELL.
    #[serde(default = "default_sell_threshold_pct")]
    pub sell_threshold_pct: f64,

    /// Cap on BUY/SELL confidence.
    #[serde(default = "default_confidence_cap")]
    pub confidence_cap: f64,

    /// Optional cap on HOLD confidence. The dashboard never capped HOLD,
    /// so the default is `None`; set a value to close that asymmetry.
    #[serde(default)]
    pub hold_confidence_cap: Option<f64>,

    // --- Nested knob tables --------------------------------------------------
    #[serde(default)]
    pub weights: ScoreWeights,

    #[serde(default)]
    pub levels: TradeLevelParams,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rsi_period: default_rsi_period(),
            sma_period: default_sma_period(),
            ema_period: default_ema_period(),
            macd_fast: default_macd_fast(),
            macd_slow: default_macd_slow(),
            bb_period: default_bb_period(),
            bb_k: default_bb_k(),
            sr_window: default_sr_window(),
            volume_period: default_volume_period(),
            ema_seed_from_front: true,
            rsi_oversold: default_rsi_oversold(),
            rsi_overbought: default_rsi_overbought(),
            proximity_band: default_proximity_band(),
            buy_threshold_pct: default_buy_threshold_pct(),
            sell_threshold_pct: default_sell_threshold_pct(),
            confidence_cap: default_confidence_cap(),
            hold_confidence_cap: None,
            weights: ScoreWeights::default(),
            levels: TradeLevelParams::default(),
        }
    }
}

// =============================================================================
// RiskProfile
// =============================================================================

/// User-level risk limits applied when validating and sizing a trade idea.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskProfile {
    /// Maximum daily risk as a percentage of portfolio value.
    #[serde(default = "default_max_daily_risk_pct")]
    pub max_daily_risk_pct: f64,

    #[serde(default = "default_portfolio_value")]
    pub portfolio_value: f64,

    /// Whether SELL ideas may be acted on at all.
    #[serde(default = "default_true")]
    pub allow_shorting: bool,
}

impl Default for RiskProfile {
    fn default() -> Self {
        Self {
            max_daily_risk_pct: default_max_daily_risk_pct(),
            portfolio_value: default_portfolio_value(),
            allow_shorting: true,
        }
    }
}

// =============================================================================
// RuntimeConfig
// =============================================================================

/// Top-level runtime configuration for the desk.
///
/// Every field has a serde default so that older JSON files missing new
/// fields still deserialise correctly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Symbols the desk is watching.
    #[serde(default = "default_symbols")]
    pub symbols: Vec<String>,

    /// Maximum bars retained per symbol.
    #[serde(default = "default_max_bars")]
    pub max_bars: usize,

    /// Bars of synthetic history generated at startup per symbol.
    #[serde(default = "default_history_bars")]
    pub history_bars: usize,

    /// Seconds between feed ticks / re-analysis passes.
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,

    /// Engine tuning knobs.
    #[serde(default)]
    pub engine: EngineConfig,

    /// Risk limits for trade validation and sizing.
    #[serde(default)]
    pub risk: RiskProfile,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            symbols: default_symbols(),
            max_bars: default_max_bars(),
            history_bars: default_history_bars(),
            refresh_interval_secs: default_refresh_interval_secs(),
            engine: EngineConfig::default(),
            risk: RiskProfile::default(),
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from a JSON file at `path`.
    ///
    /// If the file does not exist, returns an error so the caller can fall
    /// back to defaults with a warning.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config from {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config from {}", path.display()))?;

        info!(
            path = %path.display(),
            symbols = ?config.symbols,
            "runtime config loaded"
        );

        Ok(config)
    }

    /// Persist the current configuration to `path` using an atomic write
    /// (write to `.tmp`, then rename).
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        let content =
            serde_json::to_string_pretty(self).context("failed to serialise config to JSON")?;

        let tmp_path = path.with_extension("json.tmp");

        std::fs::write(&tmp_path, &content)
            .with_context(|| format!("failed to write tmp config to {}", tmp_path.display()))?;

        std::fs::rename(&tmp_path, path)
            .with_context(|| format!("failed to rename tmp config to {}", path.display()))?;

        info!(path = %path.display(), "runtime config saved (atomic)");
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_engine_knobs_match_dashboard_values() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.rsi_period, 14);
        assert_eq!(cfg.sma_period, 20);
        assert_eq!(cfg.macd_fast, 12);
        assert_eq!(cfg.macd_slow, 26);
        assert_eq!(cfg.bb_period, 20);
        assert!((cfg.bb_k - 2.0).abs() < f64::EPSILON);
        assert_eq!(cfg.sr_window, 50);
        assert!(cfg.ema_seed_from_front);
        assert!((cfg.proximity_band - 0.01).abs() < f64::EPSILON);
        assert!((cfg.buy_threshold_pct - 70.0).abs() < f64::EPSILON);
        assert!((cfg.sell_threshold_pct - 30.0).abs() < f64::EPSILON);
        assert!((cfg.confidence_cap - 95.0).abs() < f64::EPSILON);
        assert!(cfg.hold_confidence_cap.is_none());
    }

    #[test]
    fn default_weight_table() {
        let w = ScoreWeights::default();
        assert_eq!(w.rsi_extreme, 3);
        assert_eq!(w.rsi_lean, 1);
        assert_eq!(w.trend, 2);
        assert_eq!(w.momentum, 2);
        assert_eq!(w.proximity, 2);
    }

    #[test]
    fn default_level_multipliers() {
        let l = TradeLevelParams::default();
        assert!((l.entry_pad - 0.002).abs() < f64::EPSILON);
        assert!((l.stop_pct - 0.015).abs() < f64::EPSILON);
        assert!((l.level_guard_pct - 0.005).abs() < f64::EPSILON);
        assert!((l.target_steps[0] - 0.02).abs() < f64::EPSILON);
        assert!((l.target_steps[1] - 0.035).abs() < f64::EPSILON);
        assert!((l.target_steps[2] - 0.05).abs() < f64::EPSILON);
        assert!((l.hold_stop_pct - 0.015).abs() < f64::EPSILON);
        assert!((l.hold_target_pct - 0.015).abs() < f64::EPSILON);
    }

    #[test]
    fn deserialise_empty_json_uses_defaults() {
        let cfg: RuntimeConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg.symbols.len(), 10);
        assert_eq!(cfg.symbols[0], "NIFTY");
        assert_eq!(cfg.max_bars, 500);
        assert_eq!(cfg.refresh_interval_secs, 5);
        assert_eq!(cfg.engine, EngineConfig::default());
        assert_eq!(cfg.risk, RiskProfile::default());
    }

    #[test]
    fn deserialise_partial_json_fills_defaults() {
        let json = r#"{ "symbols": ["RELIANCE"], "engine": { "rsi_period": 21 } }"#;
        let cfg: RuntimeConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.symbols, vec!["RELIANCE"]);
        assert_eq!(cfg.engine.rsi_period, 21);
        assert_eq!(cfg.engine.macd_slow, 26);
        assert_eq!(cfg.engine.weights, ScoreWeights::default());
    }

    #[test]
    fn roundtrip_serialisation() {
        let cfg = RuntimeConfig::default();
        let json = serde_json::to_string(&cfg).unwrap();
        let cfg2: RuntimeConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg, cfg2);
    }

    #[test]
    fn hold_cap_roundtrips() {
        let mut cfg = RuntimeConfig::default();
        cfg.engine.hold_confidence_cap = Some(95.0);
        let json = serde_json::to_string(&cfg).unwrap();
        let cfg2: RuntimeConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg2.engine.hold_confidence_cap, Some(95.0));
    }
}
