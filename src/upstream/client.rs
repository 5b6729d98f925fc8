//! 基于 reqwest 的补全服务客户端

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

use crate::config::config::CompletionConfig;
use crate::error::{AppError, Result};
use crate::upstream::{ChatMessage, CompletionClient};

/// HTTP 补全服务客户端
///
/// `POST {base_url}/chat/complete`，请求体为 `{account_id, model, messages}`。
pub struct HttpCompletionClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
    account_id: Option<String>,
}

impl HttpCompletionClient {
    pub fn new(config: &CompletionConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
            account_id: config.account_id.clone(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/complete", self.base_url)
    }
}

#[async_trait]
impl CompletionClient for HttpCompletionClient {
    async fn chat_complete(&self, messages: &[ChatMessage]) -> Result<Value> {
        let mut request = self.client.post(self.endpoint()).json(&serde_json::json!({
            "account_id": self.account_id,
            "model": self.model,
            "messages": messages,
        }));
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!(
                "completion service returned {}: {}",
                status, error_text
            )));
        }

        let payload: Value = response.json().await?;
        Ok(payload)
    }
}
