//! # ai — OpenAI Provider Token Endpoints
//!
//! The token itself lives on the backend; this side only ever learns whether
//! one is present and whether it works.

use serde::Deserialize;

use crate::error::AppError;

use super::BackendClient;

#[derive(Debug, Deserialize)]
pub struct AiTokenStatus {
    pub present: bool,
}

#[derive(Debug, Deserialize)]
pub struct AiTokenTest {
    pub ok:    bool,
    pub model: Option<String>,
}

impl BackendClient {
    pub async fn save_openai_token(&self, token: &str) -> Result<(), AppError> {
        self.post_ack("/openai/token", &serde_json::json!({ "token": token })).await
    }

    pub async fn test_openai_token(&self) -> Result<AiTokenTest, AppError> {
        self.post_json("/openai/token/test", &serde_json::json!({})).await
    }

    pub async fn openai_status(&self) -> Result<AiTokenStatus, AppError> {
        self.get_json("/openai/status").await
    }
}
