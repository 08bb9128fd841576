//! # config — Environment Configuration
//!
//! | Variable             | Default             | Description                       |
//! |----------------------|---------------------|-----------------------------------|
//! | `BACKEND_URL`        | (unset = mock mode) | Base URL of the trading backend   |
//! | `BACKEND_API_KEY`    | (empty)             | Sent as `x-api-key` on every call |
//! | `TRADE_STATE_FILE`   | `trade-store.json`  | Persisted subset; `""` = in-memory|
//! | `BROKER_POLL_SECS`   | `30`                | Broker status cadence             |
//! | `RISK_POLL_SECS`     | `10`                | Risk status cadence               |
//! | `SNAPSHOT_POLL_SECS` | `5`                 | Snapshot/autopilot cadence        |

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the trading backend. `None` = offline mock mode.
    pub backend_url:   Option<String>,
    /// Sent as `x-api-key` on every backend request. Empty is fine for dev.
    pub api_key:       String,
    /// Where the persisted subset lives. `None` = keep it in memory only.
    pub state_file:    Option<PathBuf>,
    /// Broker connection status cadence.
    pub broker_poll:   Duration,
    /// Risk status cadence.
    pub risk_poll:     Duration,
    /// Orders/positions/portfolio/quotes/autopilot cadence.
    pub snapshot_poll: Duration,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let state_file = match std::env::var("TRADE_STATE_FILE") {
            Ok(v) if v.is_empty() => None, // explicit opt-out: ephemeral run
            Ok(v) => Some(PathBuf::from(v)),
            Err(_) => Some(PathBuf::from("trade-store.json")),
        };

        Ok(Self {
            backend_url: std::env::var("BACKEND_URL")
                .ok()
                .map(|url| url.trim_end_matches('/').to_string()),
            api_key:       std::env::var("BACKEND_API_KEY").unwrap_or_default(),
            state_file,
            broker_poll:   Duration::from_secs(env_secs("BROKER_POLL_SECS", 30)?),
            risk_poll:     Duration::from_secs(env_secs("RISK_POLL_SECS", 10)?),
            snapshot_poll: Duration::from_secs(env_secs("SNAPSHOT_POLL_SECS", 5)?),
        })
    }
}

fn env_secs(key: &str, default: u64) -> anyhow::Result<u64> {
    match std::env::var(key) {
        Ok(v) => {
            let secs: u64 = v
                .parse()
                .with_context(|| format!("{key} must be a number of seconds"))?;
            // tokio::time::interval rejects a zero period
            anyhow::ensure!(secs > 0, "{key} must be at least 1 second");
            Ok(secs)
        }
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cadence_falls_back_to_the_default() {
        assert_eq!(env_secs("TRADEDECK_TEST_UNSET_SECS", 30).unwrap(), 30);
    }

    #[test]
    fn zero_cadence_is_rejected_up_front() {
        std::env::set_var("TRADEDECK_TEST_ZERO_SECS", "0");
        assert!(env_secs("TRADEDECK_TEST_ZERO_SECS", 30).is_err());
    }

    #[test]
    fn garbage_cadence_is_rejected() {
        std::env::set_var("TRADEDECK_TEST_BAD_SECS", "soon");
        assert!(env_secs("TRADEDECK_TEST_BAD_SECS", 10).is_err());
    }
}
