//! # order — Order Book Entries
//!
//! Orders arrive as authoritative backend snapshots; nothing on this side
//! creates or advances them. Status is monotonic: `PENDING` is the sole
//! initial state, and `FILLED` / `CANCELLED` / `REJECTED` are terminal.
//! The container does not police the transition — [`OrderStatus::is_terminal`]
//! is the predicate callers use to honor it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Side {
    Buy,
    Sell,
}

/// SL = stop-loss limit, SLM = stop-loss market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderKind {
    Market,
    Limit,
    Sl,
    Slm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Filled,
    Cancelled,
    Rejected,
}

impl OrderStatus {
    /// Terminal states admit no further transition.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, OrderStatus::Pending)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id:        String,
    pub symbol:    String,
    pub side:      Side,
    pub qty:       u32,
    pub price:     f64,
    #[serde(rename = "type")]
    pub kind:      OrderKind,
    pub status:    OrderStatus,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_pending_is_non_terminal() {
        assert!(!OrderStatus::Pending.is_terminal());
        assert!(OrderStatus::Filled.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
        assert!(OrderStatus::Rejected.is_terminal());
    }

    #[test]
    fn order_wire_shape() {
        let json = r#"{
            "id": "ord-7",
            "symbol": "HDFC",
            "side": "BUY",
            "qty": 8,
            "price": 1590.0,
            "type": "LIMIT",
            "status": "PENDING",
            "timestamp": "2024-01-15T09:30:00Z"
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.kind, OrderKind::Limit);
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.side, Side::Buy);

        let back = serde_json::to_value(&order).unwrap();
        assert_eq!(back["type"], "LIMIT");
        assert_eq!(back["status"], "PENDING");
    }

    #[test]
    fn stop_kinds_serialize_uppercase() {
        assert_eq!(serde_json::to_string(&OrderKind::Sl).unwrap(), "\"SL\"");
        assert_eq!(serde_json::to_string(&OrderKind::Slm).unwrap(), "\"SLM\"");
    }
}
