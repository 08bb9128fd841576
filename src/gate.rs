//! # gate — Entry & Autopilot Gating
//!
//! Pure prerequisite checks over the trade state and the session windows.
//! The gate computes decisions; acting on them (starting the autopilot,
//! rejecting an entry) is the caller's job.

use crate::models::TradingMode;
use crate::session::MarketStatus;
use crate::state::TradeState;

// ─── Decision ─────────────────────────────────────────────────────────────────

/// Outcome of a gating check. `Blocked` carries every failed prerequisite,
/// in check order, so a UI can show the full list rather than the first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Approved,
    Blocked(Vec<String>),
}

impl GateDecision {
    pub fn is_approved(&self) -> bool {
        matches!(self, GateDecision::Approved)
    }

    pub fn reasons(&self) -> &[String] {
        match self {
            GateDecision::Approved => &[],
            GateDecision::Blocked(reasons) => reasons,
        }
    }
}

// ─── Autopilot Prerequisites ──────────────────────────────────────────────────

/// Everything the autopilot start decision needs. The state-derived fields
/// come from [`AutopilotChecks::gather`]; AI-token presence and the running
/// flag come from backend status responses.
#[derive(Debug, Clone, Copy)]
pub struct AutopilotChecks {
    pub mode:             TradingMode,
    pub ai_token_present: bool,
    pub broker_connected: bool,
    pub risk_locked:      bool,
    pub entry_allowed:    bool,
    pub already_running:  bool,
}

impl AutopilotChecks {
    pub fn gather(
        state: &TradeState,
        market: &MarketStatus,
        ai_token_present: bool,
        already_running: bool,
    ) -> Self {
        Self {
            mode:             state.mode(),
            ai_token_present,
            broker_connected: state.any_broker_connected(),
            risk_locked:      state.is_risk_locked(),
            entry_allowed:    market.entry_allowed,
            already_running,
        }
    }
}

// ─── Checks ───────────────────────────────────────────────────────────────────

/// May the autopilot be started right now?
pub fn check_autopilot_start(checks: &AutopilotChecks) -> GateDecision {
    let mut reasons = Vec::new();

    // [1] AI provider must be configured
    if !checks.ai_token_present {
        reasons.push("OpenAI token missing".to_string());
    }
    // [2] At least one broker session
    if !checks.broker_connected {
        reasons.push("No broker connected".to_string());
    }
    // [3] Daily-loss lock
    if checks.risk_locked {
        reasons.push("Risk locked".to_string());
    }
    // [4] Entry window
    if !checks.entry_allowed {
        reasons.push("Entries not allowed after 3:10 PM IST".to_string());
    }
    // [5] Single instance
    if checks.already_running {
        reasons.push("Autopilot already running".to_string());
    }

    if reasons.is_empty() {
        GateDecision::Approved
    } else {
        GateDecision::Blocked(reasons)
    }
}

/// May a new entry be taken right now? The risk lock and the entry window
/// both bind — autopilot and manual entries alike.
pub fn check_new_entry(risk_locked: bool, market: &MarketStatus) -> GateDecision {
    let mut reasons = Vec::new();

    if risk_locked {
        reasons.push("Risk locked".to_string());
    }
    if !market.entry_allowed {
        reasons.push("Entries not allowed after 3:10 PM IST".to_string());
    }

    if reasons.is_empty() {
        GateDecision::Approved
    } else {
        GateDecision::Blocked(reasons)
    }
}
