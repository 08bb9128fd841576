//! # TradeDeck — Trading Dashboard Core
//!
//! The headless core of a browser trading dashboard for Indian equities:
//! everything below the view layer. A front-end (or the bundled poll binary)
//! reads the [`state::TradeState`] container and the [`session::SessionClock`]
//! windows; periodic backend polls land their results through the container's
//! update operations.
//!
//! ## Architecture Overview
//!
//! ```text
//!  ┌──────────────┐   GET /api/v1/…status        ┌──────────────────────┐
//!  │  Trading     │ ◀────────────────────────────│  BackendClient       │
//!  │  Backend     │   (broker/risk/autopilot/    │  (reqwest, x-api-key)│
//!  │  (external)  │    positions/orders/quotes)  └──────────┬───────────┘
//!  └──────────────┘                                         │ poll loops
//!                                                           ▼
//!  ┌──────────────┐   {mode, watchlist} only     ┌──────────────────────┐
//!  │  JSON file   │ ◀───────────────────────────▶│  TradeState          │
//!  │  (persisted  │   save on change / load once │  Arc<RwLock<…>>      │
//!  │   subset)    │                              └──────────┬───────────┘
//!  └──────────────┘                                         │ reads
//!                                                           ▼
//!  ┌──────────────┐   is_entry_allowed() etc.    ┌──────────────────────┐
//!  │  SessionClock│ ─────────────────────────────▶  gate (autopilot /   │
//!  │  (IST)       │                              │   new-entry checks)  │
//!  └──────────────┘                              └──────────────────────┘
//! ```
//!
//! The session clock never mutates the container; gating logic consults both.

pub mod api;
pub mod config;
pub mod error;
pub mod gate;
pub mod models;
pub mod persist;
pub mod poll;
pub mod session;
pub mod state;
