//! # TradeDeck — Poll Agent Binary
//!
//! Thin entry point around the library: restore the persisted subset, check
//! the session window, then hand the shared state to the poll loops until
//! ctrl-c. With no `BACKEND_URL` configured the process runs fully offline
//! on mock data.

use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use tradedeck::api::BackendClient;
use tradedeck::config::Config;
use tradedeck::persist::{JsonFileStore, MemoryStore, StateStore};
use tradedeck::poll;
use tradedeck::session::SessionClock;
use tradedeck::state::{build_state, SharedState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Load .env (optional — CI/prod can use real env vars) ──────────────
    dotenvy::dotenv().ok();

    // ── 2. Initialise structured logging ─────────────────────────────────────
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env()
            .add_directive("tradedeck=debug".parse()?)
            .add_directive("reqwest=warn".parse()?))
        .init();

    info!(
        r#"

  ╔═══════════════════════════════════════════════╗
  ║         TRADEDECK — Dashboard Core            ║
  ║         Session Clock · Trade State           ║
  ╚═══════════════════════════════════════════════╝"#
    );

    // ── 3. Load configuration ────────────────────────────────────────────────
    let config = Config::from_env().context("Failed to load config")?;

    // ── 4. Build shared state, restoring the persisted subset ────────────────
    let store: Arc<dyn StateStore> = match &config.state_file {
        Some(path) => Arc::new(JsonFileStore::new(path.clone())),
        None => Arc::new(MemoryStore::new()),
    };
    let state = build_state(store);
    {
        let guard = state.read().await;
        info!(mode = %guard.mode(), watchlist = guard.watchlist().len(), "trade state restored");
    }

    // ── 5. Session clock (IST) ───────────────────────────────────────────────
    let session = Arc::new(SessionClock::new());
    let market = session.status();
    info!(
        ist     = %session.now_ist().format("%H:%M:%S"),
        open    = market.is_open,
        message = %market.next_state_message,
        "market session checked"
    );

    // ── 6. Backend client (absent = offline mock mode) ───────────────────────
    let client = BackendClient::from_config(&config);
    if let Some(client) = &client {
        bootstrap(client, &state).await;
    }

    // ── 7. Poll until shutdown ───────────────────────────────────────────────
    info!("🚀 tradedeck core started");
    tokio::select! {
        _ = poll::run(state, client, session, &config) => {}
        _ = tokio::signal::ctrl_c() => {
            info!("🔌 shutdown signal received");
        }
    }

    Ok(())
}

/// One-time fetches for slow-moving state: risk budgets and the trading
/// universe. Failures are non-fatal; the poll loops carry on regardless.
async fn bootstrap(client: &BackendClient, state: &SharedState) {
    match client.risk_config().await {
        Ok(risk) => {
            info!(
                mode      = %risk.mode,
                budget    = risk.budget,
                allocated = risk.allocations.total(),
                "risk config loaded"
            );
            state.write().await.update_budgets(risk.mode, risk.allocations);
        }
        Err(e) => warn!(error = %e, "risk config fetch failed — budgets stay at defaults"),
    }

    match client.universe().await {
        Ok(symbols) => info!(count = symbols.len(), "trading universe loaded"),
        Err(e) => warn!(error = %e, "universe fetch failed"),
    }
}
