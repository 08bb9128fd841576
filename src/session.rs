//! # session — IST Market Session Clock
//!
//! Classifies "now" against the NSE intraday schedule. The schedule is fixed
//! and expressed in minutes since midnight IST; predicates compare at seconds
//! resolution, so the first second past a boundary already falls outside its
//! window.
//!
//! | Window        | IST            | Boundary rule                    |
//! |---------------|----------------|----------------------------------|
//! | market open   | 09:15 – 15:30  | inclusive on both ends           |
//! | entry allowed | 09:15 – 15:10  | exclusive at 15:10:00            |
//! | square-off    | 15:15 onwards  | inclusive, persists past close   |

use chrono::{DateTime, FixedOffset, Timelike, Utc};
use serde::Serialize;

// ─── Schedule Constants ───────────────────────────────────────────────────────

/// 09:15 IST — market opens.
pub const MARKET_OPEN: u32 = 555;
/// 15:10 IST — last instant new entries are accepted (exclusive).
pub const ENTRY_CLOSE: u32 = 910;
/// 15:15 IST — intraday square-off begins.
pub const SQUARE_OFF: u32 = 915;
/// 15:30 IST — market closes (inclusive).
pub const MARKET_CLOSE: u32 = 930;

/// IST is a fixed +05:30; India observes no DST.
const IST_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

fn ist() -> FixedOffset {
    // +05:30 is within ±24h, always valid
    FixedOffset::east_opt(IST_OFFSET_SECS).unwrap()
}

// ─── Clock Abstraction ────────────────────────────────────────────────────────

/// Time source for [`SessionClock`]. Production uses [`SystemClock`]; tests
/// pin the instant to evaluate exact boundaries.
pub trait Clock: Send + Sync {
    fn now_utc(&self) -> DateTime<Utc>;
}

/// Reads the real system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

// ─── Market Status ────────────────────────────────────────────────────────────

/// Snapshot of the three session windows plus a display message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarketStatus {
    pub is_open:            bool,
    pub entry_allowed:      bool,
    pub square_off_due:     bool,
    /// Highest-priority next-transition message, empty mid-session.
    pub next_state_message: String,
}

// ─── Session Clock ────────────────────────────────────────────────────────────

pub struct SessionClock {
    clock: Box<dyn Clock>,
}

impl SessionClock {
    pub fn new() -> Self {
        Self::with_clock(Box::new(SystemClock))
    }

    pub fn with_clock(clock: Box<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Current IST wall-clock time.
    pub fn now_ist(&self) -> DateTime<FixedOffset> {
        self.clock.now_utc().with_timezone(&ist())
    }

    fn second_of_day(&self) -> u32 {
        self.now_ist().num_seconds_from_midnight()
    }

    /// True between 09:15:00 and 15:30:00 IST inclusive.
    pub fn is_market_open(&self) -> bool {
        let t = self.second_of_day();
        t >= MARKET_OPEN * 60 && t <= MARKET_CLOSE * 60
    }

    /// True while the market is open and the clock has not reached 15:10:00.
    /// The `<` is deliberate: at exactly 15:10:00 entries are already closed.
    pub fn is_entry_allowed(&self) -> bool {
        self.is_market_open() && self.second_of_day() < ENTRY_CLOSE * 60
    }

    /// True from 15:15:00 IST onwards, whether or not the market is open.
    pub fn is_square_off_due(&self) -> bool {
        self.second_of_day() >= SQUARE_OFF * 60
    }

    /// Compose the window booleans with the highest-priority message:
    /// closed beats entries-closed beats square-off.
    pub fn status(&self) -> MarketStatus {
        let is_open = self.is_market_open();
        let entry_allowed = self.is_entry_allowed();
        let square_off_due = self.is_square_off_due();

        let next_state_message = if !is_open {
            "market opens at 09:15".to_string()
        } else if !entry_allowed && !square_off_due {
            "entries closed, square-off at 15:15".to_string()
        } else if square_off_due {
            "market closes at 15:30".to_string()
        } else {
            String::new()
        };

        MarketStatus {
            is_open,
            entry_allowed,
            square_off_due,
            next_state_message,
        }
    }
}

impl Default for SessionClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    struct FixedClock(DateTime<Utc>);

    impl Clock for FixedClock {
        fn now_utc(&self) -> DateTime<Utc> {
            self.0
        }
    }

    /// Session clock frozen at `h:m:s` IST on an ordinary trading day.
    fn at(h: u32, m: u32, s: u32) -> SessionClock {
        let instant = ist().with_ymd_and_hms(2024, 1, 15, h, m, s).unwrap();
        SessionClock::with_clock(Box::new(FixedClock(instant.with_timezone(&Utc))))
    }

    #[test]
    fn market_open_boundaries() {
        assert!(!at(9, 14, 59).is_market_open());
        assert!(at(9, 15, 0).is_market_open());
        assert!(at(15, 30, 0).is_market_open());
        assert!(!at(15, 30, 1).is_market_open());
    }

    #[test]
    fn entry_window_closes_at_exactly_1510() {
        assert!(at(15, 9, 59).is_entry_allowed());
        assert!(!at(15, 10, 0).is_entry_allowed());
    }

    #[test]
    fn closed_market_never_allows_entries() {
        assert!(!at(8, 0, 0).is_entry_allowed());
        assert!(!at(16, 0, 0).is_entry_allowed());
    }

    #[test]
    fn square_off_starts_at_exactly_1515() {
        assert!(!at(15, 14, 59).is_square_off_due());
        assert!(at(15, 15, 0).is_square_off_due());
        assert!(at(23, 59, 59).is_square_off_due());
    }

    #[test]
    fn status_before_open() {
        let status = at(8, 0, 0).status();
        assert!(!status.is_open);
        assert!(!status.entry_allowed);
        assert!(!status.square_off_due);
        assert_eq!(status.next_state_message, "market opens at 09:15");
    }

    #[test]
    fn status_between_entry_close_and_square_off() {
        let status = at(15, 12, 0).status();
        assert!(status.is_open);
        assert!(!status.entry_allowed);
        assert!(!status.square_off_due);
        assert_eq!(status.next_state_message, "entries closed, square-off at 15:15");
    }

    #[test]
    fn status_in_square_off_window() {
        let status = at(15, 20, 0).status();
        assert!(status.is_open);
        assert!(!status.entry_allowed);
        assert!(status.square_off_due);
        assert_eq!(status.next_state_message, "market closes at 15:30");
    }

    #[test]
    fn status_mid_session_is_quiet() {
        let status = at(10, 0, 0).status();
        assert!(status.is_open);
        assert!(status.entry_allowed);
        assert_eq!(status.next_state_message, "");
    }

    #[test]
    fn status_after_close_points_at_next_open() {
        // Square-off stays due after close, but the closed message wins.
        let status = at(16, 0, 0).status();
        assert!(!status.is_open);
        assert!(status.square_off_due);
        assert_eq!(status.next_state_message, "market opens at 09:15");
    }
}
