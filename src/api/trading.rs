//! # trading — Snapshot & Universe Endpoints
//!
//! Snapshots are authoritative: the poll loop lands them through the
//! container's `replace_*` operations, wholesale. The universe is the symbol
//! set the backend's strategy engine works, maintained separately from the
//! local watchlist.

use crate::error::AppError;
use crate::models::{Order, PortfolioTotals, Position, Quote};

use super::BackendClient;

impl BackendClient {
    pub async fn positions(&self) -> Result<Vec<Position>, AppError> {
        self.get_json("/positions").await
    }

    pub async fn orders(&self) -> Result<Vec<Order>, AppError> {
        self.get_json("/orders").await
    }

    pub async fn portfolio(&self) -> Result<PortfolioTotals, AppError> {
        self.get_json("/portfolio").await
    }

    /// Batch quotes for `symbols`, typically the current watchlist.
    pub async fn quotes(&self, symbols: &[String]) -> Result<Vec<Quote>, AppError> {
        self.get_json(&format!("/quotes?symbols={}", symbols.join(","))).await
    }

    pub async fn universe(&self) -> Result<Vec<String>, AppError> {
        self.get_json("/universe").await
    }

    pub async fn save_universe(&self, symbols: &[String]) -> Result<(), AppError> {
        self.post_ack("/universe", &serde_json::json!({ "symbols": symbols })).await
    }
}
