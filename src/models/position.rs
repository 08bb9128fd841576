//! # position — Open Position Records
//!
//! Created when an order fills, repriced on every quote tick, removed on full
//! exit — all of that happens on the backend. This side only holds the latest
//! snapshot.

use serde::{Deserialize, Serialize};

use super::order::Side;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub id:            String,
    pub symbol:        String,
    pub side:          Side,
    pub qty:           u32,
    pub entry_price:   f64,
    pub current_price: f64,
    pub pnl:           f64,
    pub pnl_percent:   f64,
    #[serde(rename = "sl")]
    pub stop_loss:     Option<f64>,
    pub target:        Option<f64>,
}

impl Position {
    pub fn is_winning(&self) -> bool {
        self.pnl > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_wire_shape() {
        let json = r#"{
            "id": "1",
            "symbol": "RELIANCE",
            "side": "BUY",
            "qty": 10,
            "entry_price": 2430.5,
            "current_price": 2456.75,
            "pnl": 262.5,
            "pnl_percent": 1.08,
            "sl": 2405.0,
            "target": 2480.0
        }"#;
        let position: Position = serde_json::from_str(json).unwrap();
        assert_eq!(position.stop_loss, Some(2405.0));
        assert!(position.is_winning());
    }

    #[test]
    fn stop_and_target_are_optional() {
        let json = r#"{
            "id": "2",
            "symbol": "TCS",
            "side": "SELL",
            "qty": 5,
            "entry_price": 3720.0,
            "current_price": 3678.2,
            "pnl": -209.0,
            "pnl_percent": -1.12,
            "sl": null,
            "target": null
        }"#;
        let position: Position = serde_json::from_str(json).unwrap();
        assert_eq!(position.stop_loss, None);
        assert!(!position.is_winning());
    }
}
