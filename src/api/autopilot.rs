//! # autopilot — Autopilot Lifecycle Endpoints
//!
//! Start requests should pass [`check_autopilot_start`] first; the backend
//! re-validates anyway and answers with a rejection if a prerequisite fell
//! through in between.
//!
//! [`check_autopilot_start`]: crate::gate::check_autopilot_start

use serde::Deserialize;

use crate::error::AppError;
use crate::models::TradingMode;

use super::BackendClient;

#[derive(Debug, Deserialize)]
pub struct AutopilotStatus {
    pub running: bool,
    /// Mode the running instance was started in; absent when stopped.
    pub mode:    Option<TradingMode>,
}

impl BackendClient {
    pub async fn start_autopilot(&self, mode: TradingMode) -> Result<(), AppError> {
        self.post_ack("/autopilot/start", &serde_json::json!({ "mode": mode })).await
    }

    pub async fn stop_autopilot(&self) -> Result<(), AppError> {
        self.post_ack("/autopilot/stop", &serde_json::json!({})).await
    }

    pub async fn autopilot_status(&self) -> Result<AutopilotStatus, AppError> {
        self.get_json("/autopilot/status").await
    }
}
