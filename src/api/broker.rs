//! # broker — Zerodha / AngelOne Session Endpoints
//!
//! Zerodha logs in through a redirect URL the user opens in a browser;
//! AngelOne takes credentials plus TOTP directly. Status responses convert
//! into [`BrokerPatch`]es so the poll loop can merge them into the container
//! without clearing identity fields.

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::{BrokerPatch, ConnectionStatus};

use super::BackendClient;

/// Zerodha login bootstrap; the flow completes in the user's browser.
#[derive(Debug, Deserialize)]
pub struct ZerodhaLogin {
    pub login_url: String,
}

#[derive(Debug, Deserialize)]
pub struct ZerodhaStatus {
    pub connected: bool,
    pub user_id:   Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AngelCredentials {
    pub api_key:     String,
    pub client_code: String,
    pub password:    String,
    pub totp:        Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AngelStatus {
    pub connected:         bool,
    pub client_code:       Option<String>,
    pub feed_token_age_ms: Option<u64>,
}

fn status_of(connected: bool) -> ConnectionStatus {
    if connected {
        ConnectionStatus::Connected
    } else {
        ConnectionStatus::Disconnected
    }
}

impl ZerodhaStatus {
    pub fn into_patch(self) -> BrokerPatch {
        BrokerPatch {
            status:  Some(status_of(self.connected)),
            user_id: self.user_id,
            ..BrokerPatch::default()
        }
    }
}

impl AngelStatus {
    pub fn into_patch(self) -> BrokerPatch {
        BrokerPatch {
            status:            Some(status_of(self.connected)),
            client_code:       self.client_code,
            feed_token_age_ms: self.feed_token_age_ms,
            ..BrokerPatch::default()
        }
    }
}

impl BackendClient {
    pub async fn zerodha_login(&self) -> Result<ZerodhaLogin, AppError> {
        self.post_json("/zerodha/login", &serde_json::json!({})).await
    }

    pub async fn zerodha_logout(&self) -> Result<(), AppError> {
        self.post_ack("/zerodha/logout", &serde_json::json!({})).await
    }

    pub async fn zerodha_status(&self) -> Result<ZerodhaStatus, AppError> {
        self.get_json("/zerodha/status").await
    }

    pub async fn angelone_login(&self, credentials: &AngelCredentials) -> Result<(), AppError> {
        self.post_ack("/angelone/login", credentials).await
    }

    pub async fn angelone_logout(&self) -> Result<(), AppError> {
        self.post_ack("/angelone/logout", &serde_json::json!({})).await
    }

    pub async fn angelone_status(&self) -> Result<AngelStatus, AppError> {
        self.get_json("/angelone/status").await
    }
}
