//! 外部补全服务模块
//!
//! 对话与报告分析优先调用外部补全服务；任何失败都由调用方转交规则引擎处理。

pub mod client;
pub mod prompt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AppError, Result};

pub use client::HttpCompletionClient;

/// 补全请求中的一条消息
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    /// system / user / assistant
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

/// 补全服务客户端 trait
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// 发送消息，返回原始 JSON 负载
    async fn chat_complete(&self, messages: &[ChatMessage]) -> Result<Value>;
}

/// 未启用补全服务时使用的客户端，总是失败
#[derive(Debug, Default, Clone)]
pub struct DisabledClient;

#[async_trait]
impl CompletionClient for DisabledClient {
    async fn chat_complete(&self, _messages: &[ChatMessage]) -> Result<Value> {
        Err(AppError::Upstream("completion service is disabled".to_string()))
    }
}

/// 候选文本字段，按优先级排列
const TEXT_FIELDS: &[&str] = &["content", "text", "response"];

/// 从补全负载中取出可用文本
///
/// 依次尝试非空的 `answer`、`content`、`text`、`response`，
/// 最后退回到对象中任意一个非空字符串值。
pub fn extract_completion_text(payload: &Value) -> Result<String> {
    let object = payload
        .as_object()
        .filter(|o| !o.is_empty())
        .ok_or_else(|| AppError::Upstream("empty or invalid completion response".to_string()))?;

    let non_empty = |v: &Value| v.as_str().filter(|s| !s.trim().is_empty()).map(str::to_string);

    std::iter::once("answer")
        .chain(TEXT_FIELDS.iter().copied())
        .find_map(|field| object.get(field).and_then(non_empty))
        .or_else(|| object.values().find_map(non_empty))
        .ok_or_else(|| AppError::Upstream("no usable content in completion response".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!({"answer": "A", "content": "C"}), "A")]
    #[case(json!({"answer": "", "content": "C"}), "C")]
    #[case(json!({"text": "T", "response": "R"}), "T")]
    #[case(json!({"response": "R"}), "R")]
    #[case(json!({"id": 7, "message": "M"}), "M")]
    fn test_extract_completion_text(#[case] payload: Value, #[case] expected: &str) {
        assert_eq!(extract_completion_text(&payload).unwrap(), expected);
    }

    #[rstest]
    #[case(json!({}))]
    #[case(json!(null))]
    #[case(json!("plain"))]
    #[case(json!({"answer": "", "count": 3}))]
    fn test_unusable_payload_is_upstream_error(#[case] payload: Value) {
        assert!(matches!(
            extract_completion_text(&payload),
            Err(AppError::Upstream(_))
        ));
    }

    #[tokio::test]
    async fn test_disabled_client_fails() {
        let client = DisabledClient;
        let result = client.chat_complete(&[ChatMessage::user("hi")]).await;
        assert!(matches!(result, Err(AppError::Upstream(_))));
    }
}
