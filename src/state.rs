//! # state
//!
//! The TradeDeck **trading-state container** — the single source of truth a
//! dashboard renders from and the landing point for every backend poll
//! result.
//!
//! ## Design Decisions
//!
//! * `TradeState` itself is a plain synchronous container: every operation is
//!   a structural replace or merge that cannot fail and never awaits. All
//!   suspension lives in the poll/client layer.
//! * Fields are private behind read accessors, so the fixed operation set
//!   below is the only way anything mutates — no caller can reach in and
//!   half-update the portfolio group.
//! * The process-wide instance is shared as `Arc<RwLock<TradeState>>`
//!   ([`SharedState`]): many concurrent readers, one writer at a time, and
//!   each operation completes under a single write guard so readers never
//!   observe a torn update.
//! * The persistence backend is injected as a [`StateStore`] trait object.
//!   Only `{mode, watchlist}` are written, on every change to either field;
//!   a failed write is logged and the in-memory mutation stands.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::warn;

use crate::models::{
    AutopilotFlags, BrokerBook, BrokerConnection, BrokerId, BrokerPatch, BudgetAllocation,
    BudgetBook, Order, PortfolioTotals, Position, Quote, TradingMode,
};
use crate::persist::{PersistedState, StateStore};

// ─── TradeState ───────────────────────────────────────────────────────────────

pub struct TradeState {
    mode:        TradingMode,
    autopilot:   AutopilotFlags,
    risk_locked: bool,
    brokers:     BrokerBook,
    budgets:     BudgetBook,
    positions:   Vec<Position>,
    orders:      Vec<Order>,
    quotes:      HashMap<String, Quote>,
    portfolio:   PortfolioTotals,
    watchlist:   Vec<String>,
    store:       Arc<dyn StateStore>,
}

impl TradeState {
    /// Build the container, restoring the persisted subset through `store`.
    /// Everything outside the subset starts at its default and is repopulated
    /// by the poll loops.
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        let restored = store.load().unwrap_or_default();
        Self {
            mode:        restored.mode,
            autopilot:   AutopilotFlags::default(),
            risk_locked: false,
            brokers:     BrokerBook::default(),
            budgets:     BudgetBook::default(),
            positions:   Vec::new(),
            orders:      Vec::new(),
            quotes:      HashMap::new(),
            portfolio:   PortfolioTotals::default(),
            watchlist:   restored.watchlist,
            store,
        }
    }

    // ─── Reads ───────────────────────────────────────────────────────────────

    pub fn mode(&self) -> TradingMode {
        self.mode
    }

    pub fn autopilot(&self) -> AutopilotFlags {
        self.autopilot
    }

    pub fn is_risk_locked(&self) -> bool {
        self.risk_locked
    }

    pub fn broker(&self, id: BrokerId) -> &BrokerConnection {
        self.brokers.get(id)
    }

    pub fn any_broker_connected(&self) -> bool {
        self.brokers.any_connected()
    }

    pub fn budgets(&self, mode: TradingMode) -> BudgetAllocation {
        *self.budgets.get(mode)
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn quote(&self, symbol: &str) -> Option<&Quote> {
        self.quotes.get(symbol)
    }

    pub fn portfolio(&self) -> PortfolioTotals {
        self.portfolio
    }

    pub fn watchlist(&self) -> &[String] {
        &self.watchlist
    }

    // ─── Mode & Flags ────────────────────────────────────────────────────────

    /// Replace the trading mode. Positions, orders and budgets are untouched;
    /// they are mode-agnostic in storage.
    pub fn set_mode(&mut self, mode: TradingMode) {
        self.mode = mode;
        self.persist_subset();
    }

    /// Flip the autopilot flag for one mode; the other mode keeps its flag.
    pub fn set_autopilot(&mut self, mode: TradingMode, enabled: bool) {
        self.autopilot.set(mode, enabled);
    }

    /// Externally computed daily-loss lock. This container never derives it;
    /// the gate reads it.
    pub fn set_risk_locked(&mut self, locked: bool) {
        self.risk_locked = locked;
    }

    // ─── Brokers & Budgets ───────────────────────────────────────────────────

    /// Merge `patch` into the broker's record. Fields the patch leaves unset
    /// keep their prior value — a DISCONNECTED patch does not wipe identity
    /// fields.
    pub fn update_broker_connection(&mut self, id: BrokerId, patch: BrokerPatch) {
        patch.apply(self.brokers.get_mut(id));
    }

    /// Replace the full allocation record for `mode`. No validation here; the
    /// sum-vs-budget check belongs to the caller.
    pub fn update_budgets(&mut self, mode: TradingMode, allocation: BudgetAllocation) {
        *self.budgets.get_mut(mode) = allocation;
    }

    // ─── Snapshot Landing Points ─────────────────────────────────────────────

    /// Adopt an authoritative position snapshot. Full replace, never a merge.
    pub fn replace_positions(&mut self, positions: Vec<Position>) {
        self.positions = positions;
    }

    /// Adopt an authoritative order snapshot. Full replace, never a merge.
    pub fn replace_orders(&mut self, orders: Vec<Order>) {
        self.orders = orders;
    }

    /// Insert or overwrite one quote, keyed by its symbol.
    pub fn upsert_quote(&mut self, quote: Quote) {
        self.quotes.insert(quote.symbol.clone(), quote);
    }

    /// Replace all four P&L/margin scalars at once. The struct parameter
    /// keeps partial updates unrepresentable.
    pub fn update_portfolio_totals(&mut self, totals: PortfolioTotals) {
        self.portfolio = totals;
    }

    // ─── Watchlist ───────────────────────────────────────────────────────────

    /// Append `symbol` unless already present; insertion order is preserved.
    pub fn add_to_watchlist(&mut self, symbol: &str) {
        if self.watchlist.iter().any(|s| s == symbol) {
            return;
        }
        self.watchlist.push(symbol.to_string());
        self.persist_subset();
    }

    /// Drop `symbol` if present; silently does nothing otherwise.
    pub fn remove_from_watchlist(&mut self, symbol: &str) {
        let before = self.watchlist.len();
        self.watchlist.retain(|s| s != symbol);
        if self.watchlist.len() != before {
            self.persist_subset();
        }
    }

    // ─── Persistence ─────────────────────────────────────────────────────────

    fn persist_subset(&self) {
        let subset = PersistedState {
            mode:      self.mode,
            watchlist: self.watchlist.clone(),
        };
        if let Err(e) = self.store.save(&subset) {
            warn!(error = %e, "persisted subset write failed");
        }
    }
}

// ─── Shared Handle ────────────────────────────────────────────────────────────

/// The process-wide instance shared between poll tasks and readers.
pub type SharedState = Arc<RwLock<TradeState>>;

/// Build the shared container ready for injection into the poll loops.
pub fn build_state(store: Arc<dyn StateStore>) -> SharedState {
    Arc::new(RwLock::new(TradeState::new(store)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ConnectionStatus, OrderKind, OrderStatus, Side};
    use crate::persist::MemoryStore;
    use chrono::Utc;

    fn fresh() -> TradeState {
        TradeState::new(Arc::new(MemoryStore::new()))
    }

    fn position(id: &str, symbol: &str) -> Position {
        Position {
            id:            id.to_string(),
            symbol:        symbol.to_string(),
            side:          Side::Buy,
            qty:           10,
            entry_price:   100.0,
            current_price: 101.0,
            pnl:           10.0,
            pnl_percent:   1.0,
            stop_loss:     None,
            target:        None,
        }
    }

    fn order(id: &str, symbol: &str) -> Order {
        Order {
            id:        id.to_string(),
            symbol:    symbol.to_string(),
            side:      Side::Buy,
            qty:       5,
            price:     100.0,
            kind:      OrderKind::Limit,
            status:    OrderStatus::Pending,
            timestamp: Utc::now(),
        }
    }

    fn quote(symbol: &str, ltp: f64) -> Quote {
        Quote {
            symbol:         symbol.to_string(),
            ltp,
            bid:            ltp - 0.1,
            ask:            ltp + 0.1,
            change:         1.0,
            change_percent: 0.1,
            volume:         1000.0,
            age_ms:         0,
        }
    }

    #[test]
    fn fresh_state_has_defaults() {
        let state = fresh();
        assert_eq!(state.mode(), TradingMode::Paper);
        assert!(!state.is_risk_locked());
        assert!(!state.autopilot().paper);
        assert!(state.positions().is_empty());
        assert!(state.orders().is_empty());
        assert!(!state.any_broker_connected());
        assert_eq!(state.portfolio(), PortfolioTotals::default());
        assert_eq!(
            state.watchlist().to_vec(),
            vec!["NIFTY", "BANKNIFTY", "RELIANCE", "TCS", "INFY"]
        );
    }

    #[test]
    fn set_mode_leaves_books_alone() {
        let mut state = fresh();
        state.replace_positions(vec![position("1", "RELIANCE")]);
        state.replace_orders(vec![order("1", "HDFC")]);
        state.update_budgets(TradingMode::Paper, BudgetAllocation { zerodha: 1000.0, angelone: 0.0 });

        state.set_mode(TradingMode::Live);

        assert_eq!(state.mode(), TradingMode::Live);
        assert_eq!(state.positions().len(), 1);
        assert_eq!(state.orders().len(), 1);
        assert_eq!(state.budgets(TradingMode::Paper).zerodha, 1000.0);
    }

    #[test]
    fn autopilot_flags_toggle_per_mode() {
        let mut state = fresh();
        state.set_autopilot(TradingMode::Live, true);
        assert!(state.autopilot().live);
        assert!(!state.autopilot().paper);
    }

    #[test]
    fn watchlist_add_has_set_semantics() {
        let mut state = fresh();
        state.add_to_watchlist("HDFC");
        state.add_to_watchlist("NIFTY"); // already present
        state.add_to_watchlist("HDFC");  // just added above

        let list = state.watchlist().to_vec();
        assert_eq!(list.iter().filter(|s| *s == "NIFTY").count(), 1);
        assert_eq!(list.iter().filter(|s| *s == "HDFC").count(), 1);
        // appended at the end, original order intact
        assert_eq!(list.last().map(String::as_str), Some("HDFC"));
        assert_eq!(list.first().map(String::as_str), Some("NIFTY"));
    }

    #[test]
    fn watchlist_remove_absent_is_noop() {
        let mut state = fresh();
        let before = state.watchlist().to_vec();
        state.remove_from_watchlist("WIPRO");
        assert_eq!(state.watchlist().to_vec(), before);
    }

    #[test]
    fn broker_patch_retains_unpatched_fields() {
        let mut state = fresh();
        state.update_broker_connection(
            BrokerId::Zerodha,
            BrokerPatch {
                status: Some(ConnectionStatus::Connected),
                user_id: Some("U1".to_string()),
                ..BrokerPatch::default()
            },
        );
        state.update_broker_connection(
            BrokerId::Zerodha,
            BrokerPatch {
                status: Some(ConnectionStatus::Disconnected),
                ..BrokerPatch::default()
            },
        );

        let zerodha = state.broker(BrokerId::Zerodha);
        assert_eq!(zerodha.status, ConnectionStatus::Disconnected);
        // stale identity is retained, not cleared
        assert_eq!(zerodha.user_id.as_deref(), Some("U1"));
        // the other broker was never touched
        assert_eq!(state.broker(BrokerId::AngelOne), &BrokerConnection::default());
    }

    #[test]
    fn budgets_replace_whole_record_per_mode() {
        let mut state = fresh();
        state.update_budgets(TradingMode::Paper, BudgetAllocation { zerodha: 30_000.0, angelone: 20_000.0 });
        state.update_budgets(TradingMode::Paper, BudgetAllocation { zerodha: 10_000.0, angelone: 0.0 });

        assert_eq!(state.budgets(TradingMode::Paper).zerodha, 10_000.0);
        assert_eq!(state.budgets(TradingMode::Paper).angelone, 0.0);
        assert_eq!(state.budgets(TradingMode::Live), BudgetAllocation::default());
    }

    #[test]
    fn replace_positions_is_full_replace() {
        let mut state = fresh();
        state.replace_positions(vec![position("1", "RELIANCE"), position("2", "TCS")]);
        assert_eq!(state.positions().len(), 2);

        state.replace_positions(vec![]);
        assert!(state.positions().is_empty());
    }

    #[test]
    fn upsert_quote_overwrites_by_symbol() {
        let mut state = fresh();
        state.upsert_quote(quote("NIFTY", 19_850.75));
        state.upsert_quote(quote("BANKNIFTY", 45_680.25));
        state.upsert_quote(quote("NIFTY", 19_900.00));

        let nifty = state.quote("NIFTY").unwrap();
        assert_eq!(nifty.ltp, 19_900.00);
        assert!(state.quote("BANKNIFTY").is_some());
        assert!(state.quote("SENSEX").is_none());
    }

    #[test]
    fn portfolio_totals_replace_as_one_group() {
        let mut state = fresh();
        let totals = PortfolioTotals {
            total_pnl:        53.5,
            day_pnl:          53.5,
            available_margin: 85_430.0,
            used_margin:      14_570.0,
        };
        state.update_portfolio_totals(totals);
        assert_eq!(state.portfolio(), totals);
    }

    #[test]
    fn persisted_subset_round_trip() {
        let store = Arc::new(MemoryStore::new());

        let mut first = TradeState::new(store.clone());
        first.set_mode(TradingMode::Live);
        for symbol in ["NIFTY", "BANKNIFTY", "RELIANCE", "INFY"] {
            first.remove_from_watchlist(symbol);
        }
        first.replace_positions(vec![position("1", "RELIANCE")]);
        first.set_risk_locked(true);
        first.set_autopilot(TradingMode::Live, true);
        drop(first);

        // restart: same backing store, fresh container
        let second = TradeState::new(store);
        assert_eq!(second.mode(), TradingMode::Live);
        assert_eq!(second.watchlist().to_vec(), vec!["TCS"]);
        // everything outside the subset is back at defaults
        assert!(second.positions().is_empty());
        assert!(!second.is_risk_locked());
        assert!(!second.autopilot().live);
        assert_eq!(second.portfolio(), PortfolioTotals::default());
    }

    #[test]
    fn subset_is_written_on_every_mode_and_watchlist_change() {
        let store = Arc::new(MemoryStore::new());
        let mut state = TradeState::new(store.clone());

        state.set_mode(TradingMode::Live);
        assert_eq!(store.load().map(|s| s.mode), Some(TradingMode::Live));

        state.add_to_watchlist("HDFC");
        let saved = store.load().unwrap();
        assert!(saved.watchlist.contains(&"HDFC".to_string()));

        state.remove_from_watchlist("HDFC");
        let saved = store.load().unwrap();
        assert!(!saved.watchlist.contains(&"HDFC".to_string()));
    }

    #[test]
    fn non_subset_mutations_do_not_persist() {
        let store = Arc::new(MemoryStore::new());
        let mut state = TradeState::new(store.clone());

        state.set_risk_locked(true);
        state.replace_positions(vec![position("1", "RELIANCE")]);
        state.upsert_quote(quote("NIFTY", 19_850.75));

        assert_eq!(store.load(), None);
    }
}
