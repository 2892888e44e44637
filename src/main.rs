// =============================================================================
// Meridian Signal Desk — Main Entry Point
// =============================================================================
//
// Boot order: env + logging, config (with fallback to defaults), shared
// state, synthetic history seed, feed/analysis loop, HTTP API, graceful
// shutdown. The feed is synthetic by design — swap the SyntheticFeed for a
// venue adapter to go live without touching the engine.
// =============================================================================

// ── Module declarations ──────────────────────────────────────────────────────
mod analysis;
mod api;
mod app_state;
mod config;
mod engine;
mod indicators;
mod market_data;
mod market_hours;
mod patterns;
mod risk;
mod signals;
mod types;

use std::sync::Arc;

use anyhow::Context;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::analysis::AnalysisDesk;
use crate::app_state::AppState;
use crate::config::{RuntimeConfig, CONFIG_FILE};
use crate::market_data::{base_price, SyntheticFeed};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Environment & config ──────────────────────────────────────────
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("╔══════════════════════════════════════════════════════════╗");
    info!("║        Meridian Signal Desk — Starting Up               ║");
    info!("╚══════════════════════════════════════════════════════════╝");

    let mut config = RuntimeConfig::load(CONFIG_FILE).unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        RuntimeConfig::default()
    });

    // Override symbols from env if available.
    if let Ok(syms) = std::env::var("MERIDIAN_SYMBOLS") {
        config.symbols = syms
            .split(',')
            .map(|s| s.trim().to_uppercase())
            .filter(|s| !s.is_empty())
            .collect();
    }
    if config.symbols.is_empty() {
        config.symbols = RuntimeConfig::default().symbols;
    }

    info!(symbols = ?config.symbols, "Configured watchlist");

    let history_bars = config.history_bars;

    // ── 2. Build shared state ────────────────────────────────────────────
    let state = Arc::new(AppState::new(config));

    // ── 3. Seed synthetic history and run the first analysis pass ───────
    {
        let symbols = state.runtime_config.read().symbols.clone();
        let mut feed = SyntheticFeed::new();
        let now = chrono::Utc::now();

        for symbol in &symbols {
            let bars = feed.history(symbol, history_bars, now);
            state.bar_store.extend(symbol, bars);
            if let Some(record) = AnalysisDesk::evaluate_symbol(&state, symbol) {
                state.record_analysis(record);
            }
        }
        state.increment_version();
        info!(
            count = symbols.len(),
            bars = history_bars,
            "Synthetic history seeded"
        );
    }

    // ── 4. Feed + analysis loop ──────────────────────────────────────────
    let feed_state = state.clone();
    tokio::spawn(async move {
        let mut feed = SyntheticFeed::new();
        loop {
            let secs = feed_state
                .runtime_config
                .read()
                .refresh_interval_secs
                .max(1);
            tokio::time::sleep(std::time::Duration::from_secs(secs)).await;

            let symbols = feed_state.runtime_config.read().symbols.clone();
            let now = chrono::Utc::now();

            for symbol in &symbols {
                let prev_close = feed_state
                    .bar_store
                    .last_close(symbol)
                    .unwrap_or_else(|| base_price(symbol));
                let bar = feed.next_bar(prev_close, now);
                feed_state.bar_store.push(symbol, bar);

                match AnalysisDesk::evaluate_symbol(&feed_state, symbol) {
                    Some(record) => feed_state.record_analysis(record),
                    None => warn!(symbol = %symbol, "no analysis produced"),
                }
            }
            feed_state.increment_version();
        }
    });

    // ── 5. Start the API server ──────────────────────────────────────────
    let api_state = state.clone();
    let bind_addr =
        std::env::var("MERIDIAN_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".into());

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind API server on {bind_addr}"))?;
    info!(addr = %bind_addr, "API server listening");

    tokio::spawn(async move {
        let app = api::rest::router(api_state);
        if let Err(e) = axum::serve(listener, app).await {
            error!(error = %e, "API server failed");
        }
    });

    info!("All subsystems running. Press Ctrl+C to stop.");

    // ── 6. Graceful shutdown ─────────────────────────────────────────────
    tokio::signal::ctrl_c().await?;
    warn!("Shutdown signal received — stopping gracefully");

    if let Err(e) = state.runtime_config.read().save(CONFIG_FILE) {
        error!(error = %e, "Failed to save runtime config on shutdown");
    }

    info!("Meridian Signal Desk shut down complete.");
    Ok(())
}
