//! # persist — Durable Subset of the Trade State
//!
//! Only `{mode, watchlist}` survive restarts; everything else is repopulated
//! from the backend on fresh load. The store (de)serializes a dedicated
//! [`PersistedState`] struct rather than the full state shape, so a new field
//! becomes durable only by being added here deliberately.

use std::path::PathBuf;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::AppError;
use crate::models::TradingMode;

/// Symbols every fresh install starts with.
pub const DEFAULT_WATCHLIST: [&str; 5] = ["NIFTY", "BANKNIFTY", "RELIANCE", "TCS", "INFY"];

/// The durable subset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedState {
    pub mode:      TradingMode,
    pub watchlist: Vec<String>,
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            mode:      TradingMode::Paper,
            watchlist: DEFAULT_WATCHLIST.iter().map(|s| s.to_string()).collect(),
        }
    }
}

// ─── Store Abstraction ────────────────────────────────────────────────────────

/// Backing storage for the persisted subset.
///
/// `load` answers `None` for "nothing usable" — absent and corrupt look the
/// same to the caller, which falls back to defaults. `save` errors are
/// reported but must never fail the mutation that triggered the write.
pub trait StateStore: Send + Sync {
    fn load(&self) -> Option<PersistedState>;
    fn save(&self, state: &PersistedState) -> Result<(), AppError>;
}

// ─── JSON File Store ──────────────────────────────────────────────────────────

/// Pretty-printed JSON document on local disk.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl StateStore for JsonFileStore {
    fn load(&self) -> Option<PersistedState> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "no persisted state, using defaults");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(state) => Some(state),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "persisted state unreadable, using defaults");
                None
            }
        }
    }

    fn save(&self, state: &PersistedState) -> Result<(), AppError> {
        let json = serde_json::to_string_pretty(state)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

// ─── In-Memory Store ──────────────────────────────────────────────────────────

/// Holds the subset in memory only — ephemeral runs (`TRADE_STATE_FILE=""`)
/// and restart round-trip tests.
#[derive(Default)]
pub struct MemoryStore {
    slot: Mutex<Option<PersistedState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStore {
    fn load(&self) -> Option<PersistedState> {
        self.slot.lock().ok().and_then(|slot| slot.clone())
    }

    fn save(&self, state: &PersistedState) -> Result<(), AppError> {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = Some(state.clone());
        }
        Ok(())
    }
}
