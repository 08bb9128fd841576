//! # poll — Backend Poll Loops
//!
//! Timer-driven bridges between the REST client and the state container.
//! Every successful response lands through exactly one container operation;
//! every failure is logged and skipped, leaving the state untouched until
//! the next tick.
//!
//! ```text
//!  broker status ──── 30s ──▶ update_broker_connection (merge patch)
//!  risk status ────── 10s ──▶ set_risk_locked
//!  snapshots ──────── 5s ───▶ replace_positions / replace_orders /
//!                              update_portfolio_totals / upsert_quote
//!  autopilot status ─ 5s ───▶ set_autopilot + start-gate diagnostics
//!  session watcher ── 30s ──▶ market-window transition logs
//! ```

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::api::BackendClient;
use crate::config::Config;
use crate::gate::{check_autopilot_start, check_new_entry, AutopilotChecks};
use crate::models::{
    BrokerId, ConnectionStatus, Order, OrderKind, OrderStatus, PortfolioTotals, Position, Quote,
    Side, TradingMode,
};
use crate::session::{MarketStatus, SessionClock};
use crate::state::{SharedState, TradeState};

const SESSION_WATCH_INTERVAL: Duration = Duration::from_secs(30);

/// Run all poll loops until the process shuts down. Without a backend client
/// the store is seeded once with demo data and only the session watcher runs.
pub async fn run(
    state: SharedState,
    client: Option<BackendClient>,
    session: Arc<SessionClock>,
    config: &Config,
) {
    match client {
        Some(client) => {
            tokio::join!(
                broker_status_loop(&state, &client, config.broker_poll),
                risk_status_loop(&state, &client, config.risk_poll),
                snapshot_loop(&state, &client, config.snapshot_poll),
                autopilot_loop(&state, &client, &session, config.snapshot_poll),
                session_watch_loop(&state, &session),
            );
        }
        None => {
            warn!("BACKEND_URL not set — seeding MOCK trading data");
            seed_mock_data(&state).await;
            session_watch_loop(&state, &session).await;
        }
    }
}

// ─── Broker Status ────────────────────────────────────────────────────────────

async fn broker_status_loop(state: &SharedState, client: &BackendClient, every: Duration) {
    let mut tick = tokio::time::interval(every);
    loop {
        tick.tick().await;

        match client.zerodha_status().await {
            Ok(status) => {
                let mut patch = status.into_patch();
                if patch.status == Some(ConnectionStatus::Connected) {
                    patch.last_seen = Some(Utc::now());
                }
                state.write().await.update_broker_connection(BrokerId::Zerodha, patch);
            }
            Err(e) => warn!(broker = %BrokerId::Zerodha, error = %e, "broker status poll failed"),
        }

        match client.angelone_status().await {
            Ok(status) => {
                let mut patch = status.into_patch();
                if patch.status == Some(ConnectionStatus::Connected) {
                    patch.last_seen = Some(Utc::now());
                }
                state.write().await.update_broker_connection(BrokerId::AngelOne, patch);
            }
            Err(e) => warn!(broker = %BrokerId::AngelOne, error = %e, "broker status poll failed"),
        }
    }
}

// ─── Risk Status ──────────────────────────────────────────────────────────────

async fn risk_status_loop(state: &SharedState, client: &BackendClient, every: Duration) {
    let mut tick = tokio::time::interval(every);
    loop {
        tick.tick().await;

        match client.risk_status().await {
            Ok(status) => {
                let was_locked = {
                    let mut guard = state.write().await;
                    let was = guard.is_risk_locked();
                    guard.set_risk_locked(status.risk_locked);
                    was
                };
                if status.risk_locked && !was_locked {
                    warn!(
                        reason = status.reason.as_deref().unwrap_or("daily loss limit"),
                        "⛔ risk lock engaged — no new entries"
                    );
                } else if was_locked && !status.risk_locked {
                    info!("✅ risk lock released");
                }
            }
            Err(e) => warn!(error = %e, "risk status poll failed"),
        }
    }
}

// ─── Snapshots ────────────────────────────────────────────────────────────────

async fn snapshot_loop(state: &SharedState, client: &BackendClient, every: Duration) {
    let mut tick = tokio::time::interval(every);
    loop {
        tick.tick().await;

        match client.positions().await {
            Ok(positions) => {
                let winners = positions.iter().filter(|p| p.is_winning()).count();
                debug!(total = positions.len(), winners, "position snapshot applied");
                state.write().await.replace_positions(positions);
            }
            Err(e) => warn!(error = %e, "position snapshot failed"),
        }

        match client.orders().await {
            Ok(orders) => {
                let open = orders.iter().filter(|o| !o.status.is_terminal()).count();
                debug!(total = orders.len(), open, "order snapshot applied");
                state.write().await.replace_orders(orders);
            }
            Err(e) => warn!(error = %e, "order snapshot failed"),
        }

        match client.portfolio().await {
            Ok(totals) => state.write().await.update_portfolio_totals(totals),
            Err(e) => warn!(error = %e, "portfolio snapshot failed"),
        }

        let symbols = state.read().await.watchlist().to_vec();
        match client.quotes(&symbols).await {
            Ok(quotes) => {
                let mut guard = state.write().await;
                for quote in quotes {
                    guard.upsert_quote(quote);
                }
            }
            Err(e) => warn!(error = %e, "quote snapshot failed"),
        }
    }
}

// ─── Autopilot Status ─────────────────────────────────────────────────────────

async fn autopilot_loop(
    state: &SharedState,
    client: &BackendClient,
    session: &SessionClock,
    every: Duration,
) {
    let mut tick = tokio::time::interval(every);
    loop {
        tick.tick().await;

        // Token presence only feeds the gate diagnostics; a failed poll
        // reads as absent and the status landing below still runs.
        let ai_present = match client.openai_status().await {
            Ok(status) => status.present,
            Err(e) => {
                warn!(error = %e, "ai token status poll failed");
                false
            }
        };

        match client.autopilot_status().await {
            Ok(status) => {
                let market = session.status();
                let running_mode = if status.running { status.mode } else { None };
                let checks = {
                    let mut guard = state.write().await;
                    land_autopilot_flags(&mut guard, running_mode);
                    AutopilotChecks::gather(&guard, &market, ai_present, status.running)
                };

                if status.running {
                    if market.square_off_due {
                        warn!("⚠️ autopilot still running inside the square-off window");
                    }
                } else {
                    let decision = check_autopilot_start(&checks);
                    debug!(
                        mode     = %checks.mode,
                        approved = decision.is_approved(),
                        reasons  = ?decision.reasons(),
                        "autopilot start gate"
                    );
                }
            }
            Err(e) => warn!(error = %e, "autopilot status poll failed"),
        }
    }
}

/// Mirror the backend's single running instance onto both per-mode flags.
fn land_autopilot_flags(state: &mut TradeState, running_mode: Option<TradingMode>) {
    state.set_autopilot(TradingMode::Paper, running_mode == Some(TradingMode::Paper));
    state.set_autopilot(TradingMode::Live, running_mode == Some(TradingMode::Live));
}

// ─── Session Watcher ──────────────────────────────────────────────────────────

/// Logs market-window transitions. The clock itself never mutates the
/// container; this loop only observes and narrates.
async fn session_watch_loop(state: &SharedState, session: &SessionClock) {
    let mut tick = tokio::time::interval(SESSION_WATCH_INTERVAL);
    let mut last: Option<MarketStatus> = None;
    loop {
        tick.tick().await;

        let status = session.status();
        if last.as_ref() == Some(&status) {
            continue;
        }

        info!(
            open       = status.is_open,
            entries    = status.entry_allowed,
            square_off = status.square_off_due,
            message    = %status.next_state_message,
            "📍 market session window"
        );

        let risk_locked = state.read().await.is_risk_locked();
        let entry_gate = check_new_entry(risk_locked, &status);
        if !entry_gate.is_approved() {
            debug!(reasons = ?entry_gate.reasons(), "entry gate closed");
        }

        last = Some(status);
    }
}

// ─── Mock Seeding ─────────────────────────────────────────────────────────────

/// Fixed demo data for running without a backend — the same figures the
/// dashboard ships with.
async fn seed_mock_data(state: &SharedState) {
    let mut guard = state.write().await;

    guard.replace_positions(vec![
        Position {
            id:            "1".to_string(),
            symbol:        "RELIANCE".to_string(),
            side:          Side::Buy,
            qty:           10,
            entry_price:   2430.50,
            current_price: 2456.75,
            pnl:           262.50,
            pnl_percent:   1.08,
            stop_loss:     Some(2405.00),
            target:        Some(2480.00),
        },
        Position {
            id:            "2".to_string(),
            symbol:        "TCS".to_string(),
            side:          Side::Buy,
            qty:           5,
            entry_price:   3720.00,
            current_price: 3678.20,
            pnl:           -209.00,
            pnl_percent:   -1.12,
            stop_loss:     Some(3650.00),
            target:        Some(3800.00),
        },
    ]);

    guard.replace_orders(vec![
        Order {
            id:        "1".to_string(),
            symbol:    "HDFC".to_string(),
            side:      Side::Buy,
            qty:       8,
            price:     1590.00,
            kind:      OrderKind::Limit,
            status:    OrderStatus::Pending,
            timestamp: Utc::now(),
        },
        Order {
            id:        "2".to_string(),
            symbol:    "INFY".to_string(),
            side:      Side::Sell,
            qty:       15,
            price:     1456.75,
            kind:      OrderKind::Market,
            status:    OrderStatus::Filled,
            timestamp: Utc::now(),
        },
    ]);

    guard.update_portfolio_totals(PortfolioTotals {
        total_pnl:        53.50,
        day_pnl:          53.50,
        available_margin: 85_430.0,
        used_margin:      14_570.0,
    });

    for quote in mock_quotes() {
        guard.upsert_quote(quote);
    }

    info!(positions = 2, orders = 2, quotes = 3, "🎭 mock data seeded");
}

fn mock_quotes() -> Vec<Quote> {
    vec![
        Quote {
            symbol:         "NIFTY".to_string(),
            ltp:            19_850.75,
            bid:            19_850.55,
            ask:            19_850.95,
            change:         125.30,
            change_percent: 0.63,
            volume:         45_230_000.0,
            age_ms:         0,
        },
        Quote {
            symbol:         "BANKNIFTY".to_string(),
            ltp:            45_680.25,
            bid:            45_680.05,
            ask:            45_680.45,
            change:         -87.45,
            change_percent: -0.19,
            volume:         12_450_000.0,
            age_ms:         0,
        },
        Quote {
            symbol:         "SENSEX".to_string(),
            ltp:            65_432.10,
            bid:            65_431.90,
            ask:            65_432.30,
            change:         234.56,
            change_percent: 0.36,
            volume:         23_450_000.0,
            age_ms:         0,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persist::{MemoryStore, StateStore};
    use crate::state::build_state;

    #[tokio::test]
    async fn mock_seed_populates_the_store() {
        let state = build_state(Arc::new(MemoryStore::new()));
        seed_mock_data(&state).await;

        let guard = state.read().await;
        assert_eq!(guard.positions().len(), 2);
        assert_eq!(guard.orders().len(), 2);
        assert!(guard.quote("NIFTY").is_some());
        assert!(guard.quote("SENSEX").is_some());
        assert_eq!(guard.portfolio().used_margin, 14_570.0);
        // one winner, one loser in the demo book
        assert_eq!(guard.positions().iter().filter(|p| p.is_winning()).count(), 1);
    }

    #[tokio::test]
    async fn mock_seed_does_not_touch_the_persisted_subset() {
        let store = Arc::new(MemoryStore::new());
        let state = build_state(store.clone());
        seed_mock_data(&state).await;
        assert_eq!(store.load(), None);
    }

    // The flag landing takes no token input at all: a dead AI-status
    // endpoint can never stop the running instance from being mirrored.
    #[tokio::test]
    async fn autopilot_flags_mirror_the_running_instance() {
        let state = build_state(Arc::new(MemoryStore::new()));
        let mut guard = state.write().await;

        land_autopilot_flags(&mut guard, Some(TradingMode::Live));
        assert!(guard.autopilot().live);
        assert!(!guard.autopilot().paper);

        land_autopilot_flags(&mut guard, Some(TradingMode::Paper));
        assert!(guard.autopilot().paper);
        assert!(!guard.autopilot().live);

        land_autopilot_flags(&mut guard, None);
        assert!(!guard.autopilot().paper);
        assert!(!guard.autopilot().live);
    }
}
