// =============================================================================
// Analysis Desk — per-symbol evaluation pipeline
// =============================================================================
//
// The service-side wrapper around the pure engine. For one symbol:
//   1. Read the stored bar window
//   2. Run the engine (indicators + signal)
//   3. Detect chart patterns
//   4. Attach the canned options play
//   5. Size the position and validate it against the risk profile
//   6. Wrap everything in an auditable, timestamped record
//
// Symbols with no bars yet simply produce no record; the engine's
// insufficient-data error never propagates past this layer.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::app_state::AppState;
use crate::engine;
use crate::indicators::IndicatorSet;
use crate::patterns;
use crate::risk::TradeValidation;
use crate::signals::{self, OptionsPlay, SignalResult};

/// Auditable record of one analysis pass for one symbol.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisRecord {
    /// Unique identifier for this record (UUID v4).
    pub id: String,
    pub symbol: String,
    /// ISO 8601 creation timestamp.
    pub created_at: String,
    /// Close of the newest bar in the analysed window.
    pub price: f64,
    pub indicators: IndicatorSet,
    pub signal: SignalResult,
    pub patterns: Vec<&'static str>,
    pub options_play: OptionsPlay,
    /// Shares sized by the risk engine for this idea.
    pub position_size: u64,
    pub validation: TradeValidation,
}

pub struct AnalysisDesk;

impl AnalysisDesk {
    /// Evaluate a single symbol from its stored bars.
    ///
    /// Returns `None` when no bars exist yet for the symbol.
    pub fn evaluate_symbol(state: &Arc<AppState>, symbol: &str) -> Option<AnalysisRecord> {
        let config = state.runtime_config.read().clone();
        let bars = state.bar_store.all(symbol);

        let price = bars.last()?.close;

        let analysis = match engine::analyze(&bars, &config.engine) {
            Ok(a) => a,
            Err(e) => {
                warn!(symbol, error = %e, "analysis skipped");
                return None;
            }
        };

        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let detected = patterns::detect(&closes);

        let options_play =
            signals::suggest_options(analysis.signal.signal, analysis.signal.confidence);

        let shares = state.risk_engine.position_size(
            analysis.signal.entry,
            analysis.signal.stop_loss,
            &config.risk,
            analysis.signal.confidence,
        );
        let validation = state
            .risk_engine
            .validate(&analysis.signal, shares, &config.risk);

        debug!(
            symbol,
            signal = %analysis.signal.signal,
            confidence = analysis.signal.confidence,
            bars = bars.len(),
            "symbol evaluated"
        );

        Some(AnalysisRecord {
            id: uuid::Uuid::new_v4().to_string(),
            symbol: symbol.to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            price,
            indicators: analysis.indicators,
            signal: analysis.signal,
            patterns: detected,
            options_play,
            position_size: shares,
            validation,
        })
    }
}
