//! # broker — Broker Connection Summaries
//!
//! One [`BrokerConnection`] record per supported broker. Records are updated
//! by partial patches: fields a [`BrokerPatch`] leaves unset keep their prior
//! value, so a DISCONNECTED status poll does not wipe the identity fields the
//! login flow filled in earlier.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Supported brokerage back-ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrokerId {
    Zerodha,
    AngelOne,
}

impl std::fmt::Display for BrokerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BrokerId::Zerodha => write!(f, "zerodha"),
            BrokerId::AngelOne => write!(f, "angelone"),
        }
    }
}

/// Session status as last reported by the backend. Expiry detection is the
/// backend's job; this side only mirrors what the status poll returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConnectionStatus {
    Connected,
    #[default]
    Disconnected,
    Error,
}

/// Per-broker connection summary. `user_id` is Zerodha's identity field,
/// `client_code` AngelOne's; each broker fills only its own.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BrokerConnection {
    pub status:            ConnectionStatus,
    pub user_id:           Option<String>,
    pub client_code:       Option<String>,
    pub feed_token_age_ms: Option<u64>,
    pub last_seen:         Option<DateTime<Utc>>,
}

impl BrokerConnection {
    pub fn is_connected(&self) -> bool {
        self.status == ConnectionStatus::Connected
    }
}

/// Partial update for one broker record. `None` means "leave as is".
#[derive(Debug, Clone, Default)]
pub struct BrokerPatch {
    pub status:            Option<ConnectionStatus>,
    pub user_id:           Option<String>,
    pub client_code:       Option<String>,
    pub feed_token_age_ms: Option<u64>,
    pub last_seen:         Option<DateTime<Utc>>,
}

impl BrokerPatch {
    /// Merge into `conn`, field by field.
    pub fn apply(self, conn: &mut BrokerConnection) {
        if let Some(status) = self.status {
            conn.status = status;
        }
        if let Some(user_id) = self.user_id {
            conn.user_id = Some(user_id);
        }
        if let Some(client_code) = self.client_code {
            conn.client_code = Some(client_code);
        }
        if let Some(age) = self.feed_token_age_ms {
            conn.feed_token_age_ms = Some(age);
        }
        if let Some(seen) = self.last_seen {
            conn.last_seen = Some(seen);
        }
    }
}

/// Both broker records, addressable by [`BrokerId`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BrokerBook {
    pub zerodha:  BrokerConnection,
    pub angelone: BrokerConnection,
}

impl BrokerBook {
    pub fn get(&self, id: BrokerId) -> &BrokerConnection {
        match id {
            BrokerId::Zerodha => &self.zerodha,
            BrokerId::AngelOne => &self.angelone,
        }
    }

    pub fn get_mut(&mut self, id: BrokerId) -> &mut BrokerConnection {
        match id {
            BrokerId::Zerodha => &mut self.zerodha,
            BrokerId::AngelOne => &mut self.angelone,
        }
    }

    pub fn any_connected(&self) -> bool {
        self.zerodha.is_connected() || self.angelone.is_connected()
    }
}
