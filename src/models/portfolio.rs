//! # portfolio — Portfolio Totals & Budget Allocations

use serde::{Deserialize, Serialize};

use super::mode::TradingMode;

/// The four P&L/margin scalars, replaced together as one group. Taking them
/// as a single struct keeps partial portfolio updates unrepresentable, so a
/// display never shows a day P&L from one snapshot next to margins from
/// another.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PortfolioTotals {
    pub total_pnl:        f64,
    pub day_pnl:          f64,
    pub available_margin: f64,
    pub used_margin:      f64,
}

impl Default for PortfolioTotals {
    fn default() -> Self {
        Self {
            total_pnl:        0.0,
            day_pnl:          0.0,
            available_margin: 100_000.0,
            used_margin:      0.0,
        }
    }
}

/// Per-broker capital split within one mode. Non-negative amounts; whether
/// the sum stays inside the mode's total budget is checked upstream, never
/// here.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BudgetAllocation {
    pub zerodha:  f64,
    pub angelone: f64,
}

impl BudgetAllocation {
    pub fn total(&self) -> f64 {
        self.zerodha + self.angelone
    }
}

/// Paper and live allocations, addressable by [`TradingMode`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BudgetBook {
    pub paper: BudgetAllocation,
    pub live:  BudgetAllocation,
}

impl BudgetBook {
    pub fn get(&self, mode: TradingMode) -> &BudgetAllocation {
        match mode {
            TradingMode::Paper => &self.paper,
            TradingMode::Live => &self.live,
        }
    }

    pub fn get_mut(&mut self, mode: TradingMode) -> &mut BudgetAllocation {
        match mode {
            TradingMode::Paper => &mut self.paper,
            TradingMode::Live => &mut self.live,
        }
    }
}
