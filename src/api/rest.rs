// =============================================================================
// REST API Endpoints — Axum 0.7
// =============================================================================
//
// All endpoints live under `/api/v1/`. The surface is read-mostly and serves
// a browser dashboard, so CORS is configured permissively and there is no
// authentication layer; tighten both before exposing beyond localhost.
// Analysis payloads carry the educational disclaimer verbatim.
// =============================================================================

use std::sync::Arc;

use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use crate::app_state::AppState;
use crate::config::CONFIG_FILE;
use crate::market_hours;

/// Attached to every analysis payload.
const DISCLAIMER: &str = "This is educational analysis only and not investment advice. \
     Always confirm with your broker, do your own research, and manage risk.";

// =============================================================================
// Router construction
// =============================================================================

/// Build the full REST API router with CORS middleware and shared state.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/watchlist", get(watchlist))
        .route("/api/v1/market-status", get(market_status))
        .route("/api/v1/bars/:symbol", get(bars))
        .route("/api/v1/analysis/:symbol", get(analysis))
        .route("/api/v1/analyses", get(analyses))
        .route("/api/v1/config", get(get_config))
        .route("/api/v1/config", post(patch_config))
        .route("/api/v1/ws", get(crate::api::ws::ws_handler))
        .layer(cors)
        .with_state(state)
}

// =============================================================================
// Health
// =============================================================================

async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "state_version": state.current_state_version(),
        "server_time": chrono::Utc::now().timestamp_millis(),
    }))
}

// =============================================================================
// Watchlist & market status
// =============================================================================

async fn watchlist(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let symbols = state.runtime_config.read().symbols.clone();
    Json(serde_json::json!({ "symbols": symbols }))
}

async fn market_status() -> impl IntoResponse {
    let now = chrono::Utc::now();
    let is_open = market_hours::is_open(now);
    Json(serde_json::json!({
        "is_open": is_open,
        "current_time": now.to_rfc3339(),
        "next_session": market_hours::next_session(now),
        "status": if is_open { "OPEN" } else { "CLOSED" },
    }))
}

// =============================================================================
// Bars
// =============================================================================

#[derive(Deserialize)]
struct BarsQuery {
    limit: Option<usize>,
}

async fn bars(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
    Query(query): Query<BarsQuery>,
) -> impl IntoResponse {
    let symbol = symbol.to_uppercase();
    if !state.bar_store.contains(&symbol) {
        return (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": format!("unknown symbol: {symbol}") })),
        )
            .into_response();
    }

    let limit = query.limit.unwrap_or(100);
    let bars = state.bar_store.recent(&symbol, limit);
    Json(serde_json::json!({ "symbol": symbol, "bars": bars })).into_response()
}

// =============================================================================
// Analyses
// =============================================================================

async fn analysis(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
) -> impl IntoResponse {
    let symbol = symbol.to_uppercase();
    match state.latest_analysis(&symbol) {
        Some(record) => Json(serde_json::json!({
            "analysis": record,
            "disclaimer": DISCLAIMER,
        }))
        .into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": format!("no analysis for symbol: {symbol}") })),
        )
            .into_response(),
    }
}

async fn analyses(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "analyses": state.all_analyses(),
        "disclaimer": DISCLAIMER,
    }))
}

// =============================================================================
// Config
// =============================================================================

async fn get_config(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.runtime_config.read().clone())
}

/// Partial update of the engine tuning knobs and feed cadence. Absent fields
/// are left untouched.
#[derive(Deserialize)]
struct ConfigUpdate {
    #[serde(default)]
    rsi_period: Option<usize>,
    #[serde(default)]
    sma_period: Option<usize>,
    #[serde(default)]
    ema_period: Option<usize>,
    #[serde(default)]
    macd_fast: Option<usize>,
    #[serde(default)]
    macd_slow: Option<usize>,
    #[serde(default)]
    bb_period: Option<usize>,
    #[serde(default)]
    bb_k: Option<f64>,
    #[serde(default)]
    sr_window: Option<usize>,
    #[serde(default)]
    ema_seed_from_front: Option<bool>,
    #[serde(default)]
    hold_confidence_cap: Option<f64>,
    #[serde(default)]
    refresh_interval_secs: Option<u64>,
}

async fn patch_config(
    State(state): State<Arc<AppState>>,
    Json(update): Json<ConfigUpdate>,
) -> impl IntoResponse {
    let mut changes = Vec::new();

    let config_clone = {
        let mut config = state.runtime_config.write();
        let engine = &mut config.engine;

        macro_rules! apply_knob {
            ($field:ident) => {
                if let Some(val) = update.$field {
                    if engine.$field != val {
                        changes.push(format!(
                            "{}: {:?} -> {:?}",
                            stringify!($field),
                            engine.$field,
                            val
                        ));
                        engine.$field = val;
                    }
                }
            };
        }

        apply_knob!(rsi_period);
        apply_knob!(sma_period);
        apply_knob!(ema_period);
        apply_knob!(macd_fast);
        apply_knob!(macd_slow);
        apply_knob!(bb_period);
        apply_knob!(bb_k);
        apply_knob!(sr_window);
        apply_knob!(ema_seed_from_front);

        if let Some(cap) = update.hold_confidence_cap {
            if engine.hold_confidence_cap != Some(cap) {
                changes.push(format!(
                    "hold_confidence_cap: {:?} -> {:?}",
                    engine.hold_confidence_cap,
                    Some(cap)
                ));
                engine.hold_confidence_cap = Some(cap);
            }
        }

        if let Some(secs) = update.refresh_interval_secs {
            if config.refresh_interval_secs != secs {
                changes.push(format!(
                    "refresh_interval_secs: {} -> {}",
                    config.refresh_interval_secs, secs
                ));
                config.refresh_interval_secs = secs;
            }
        }

        config.clone()
    };

    if !changes.is_empty() {
        info!(changes = ?changes, "Config updated via API");

        // Persist to disk (best-effort).
        if let Err(e) = config_clone.save(CONFIG_FILE) {
            warn!(error = %e, "Failed to save config to disk");
        }

        state.increment_version();
    }

    Json(serde_json::json!({
        "config": config_clone,
        "changes": changes,
    }))
}
