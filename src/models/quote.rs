//! # quote — Market Quotes

use serde::{Deserialize, Serialize};

/// Latest tick for one symbol. `age_ms` is how stale the backend considered
/// the tick when it answered; display layers grey out old quotes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub symbol:         String,
    pub ltp:            f64,
    pub bid:            f64,
    pub ask:            f64,
    pub change:         f64,
    pub change_percent: f64,
    pub volume:         f64,
    pub age_ms:         u64,
}
