//! # api — Backend REST Client
//!
//! Typed client over the trading backend's `/api/v1` surface. The plumbing
//! here attaches the auth header, a fresh correlation id and the request
//! timeout; the per-concern modules add the typed endpoints.
//!
//! | Group                 | Endpoints                                        |
//! |-----------------------|--------------------------------------------------|
//! | [`broker`]            | zerodha / angelone login, logout, status         |
//! | [`ai`]                | openai token save, test, status                  |
//! | [`risk`]              | risk config get/save, risk status                |
//! | [`autopilot`]         | autopilot start, stop, status                    |
//! | [`trading`]           | positions, orders, portfolio, quotes, universe   |

pub mod ai;
pub mod autopilot;
pub mod broker;
pub mod risk;
pub mod trading;

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use crate::config::Config;
use crate::error::AppError;

/// Applied to every backend call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// HTTP client for the external trading backend.
#[derive(Clone)]
pub struct BackendClient {
    http:     reqwest::Client,
    base_url: String,
    api_key:  String,
}

impl BackendClient {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            http:     reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key:  api_key.to_string(),
        }
    }

    /// `None` when no `BACKEND_URL` is configured — the process then runs in
    /// offline mock mode and never constructs a client.
    pub fn from_config(config: &Config) -> Option<Self> {
        config
            .backend_url
            .as_deref()
            .map(|url| Self::new(url, &config.api_key))
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1{path}", self.base_url)
    }

    /// GET `path` and decode the JSON body.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let resp = self
            .http
            .get(self.url(path))
            .header("x-api-key", &self.api_key)
            .header("x-request-id", Uuid::new_v4().to_string())
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| AppError::Unreachable(e.to_string()))?;
        Self::decode(resp).await
    }

    /// POST `body` to `path` and decode the JSON response.
    pub(crate) async fn post_json<T, B>(&self, path: &str, body: &B) -> Result<T, AppError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let resp = self
            .http
            .post(self.url(path))
            .header("x-api-key", &self.api_key)
            .header("x-request-id", Uuid::new_v4().to_string())
            .json(body)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| AppError::Unreachable(e.to_string()))?;
        Self::decode(resp).await
    }

    /// POST where only success matters; the acknowledgement body is dropped.
    pub(crate) async fn post_ack<B>(&self, path: &str, body: &B) -> Result<(), AppError>
    where
        B: Serialize + ?Sized,
    {
        let _: serde_json::Value = self.post_json(path, body).await?;
        Ok(())
    }

    async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, AppError> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(AppError::Rejected { status: status.as_u16(), body });
        }
        resp.json().await.map_err(|e| AppError::Decode(e.to_string()))
    }
}
