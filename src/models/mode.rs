//! # mode — Trading Mode & Autopilot Flags

use serde::{Deserialize, Serialize};

/// Paper trading simulates fills locally on the backend; live trading routes
/// real orders through a connected broker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradingMode {
    #[default]
    Paper,
    Live,
}

impl std::fmt::Display for TradingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TradingMode::Paper => write!(f, "PAPER"),
            TradingMode::Live => write!(f, "LIVE"),
        }
    }
}

/// One enable flag per mode. The flags are independent booleans, not a
/// single enum — paper and live autopilot can be toggled separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AutopilotFlags {
    pub paper: bool,
    pub live:  bool,
}

impl AutopilotFlags {
    pub fn enabled(&self, mode: TradingMode) -> bool {
        match mode {
            TradingMode::Paper => self.paper,
            TradingMode::Live => self.live,
        }
    }

    /// Set one mode's flag; the other mode is untouched.
    pub fn set(&mut self, mode: TradingMode, enabled: bool) {
        match mode {
            TradingMode::Paper => self.paper = enabled,
            TradingMode::Live => self.live = enabled,
        }
    }
}
