//! # risk — Risk Configuration & Status Endpoints
//!
//! The backend owns the risk engine; this side edits its parameters and polls
//! the lock. `risk_locked` lands in the container via `set_risk_locked` and
//! gates new entries from then on.

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::{BrokerId, BudgetAllocation, TradingMode};

use super::BackendClient;

/// Risk parameters as the settings surface edits them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskConfig {
    pub mode:               TradingMode,
    /// Total capital for the mode; `allocations` splits it per broker.
    pub budget:             f64,
    pub allocations:        BudgetAllocation,
    pub max_daily_loss:     f64,
    pub risk_per_trade_pct: f64,
    pub sl_pct:             f64,
    pub tgt_pct:            f64,
    pub primary_broker:     BrokerId,
}

#[derive(Debug, Deserialize)]
pub struct RiskStatus {
    pub risk_locked: bool,
    pub reason:      Option<String>,
}

impl BackendClient {
    pub async fn risk_config(&self) -> Result<RiskConfig, AppError> {
        self.get_json("/risk/config").await
    }

    pub async fn save_risk_config(&self, config: &RiskConfig) -> Result<(), AppError> {
        self.post_ack("/risk/config", config).await
    }

    pub async fn risk_status(&self) -> Result<RiskStatus, AppError> {
        self.get_json("/risk/status").await
    }
}
