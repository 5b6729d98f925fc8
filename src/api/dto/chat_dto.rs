//! 对话 DTO

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Turn, TurnKind};

/// 对话请求
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ChatRequest {
    pub message: String,
}

/// 对话响应
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub message: String,
    pub is_fallback: bool,
    /// 服务内部出错时为 true
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<bool>,
}

/// 历史轮次
#[derive(Debug, Serialize, Deserialize)]
pub struct TurnResponse {
    #[serde(rename = "type")]
    pub kind: TurnKind,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<Turn> for TurnResponse {
    fn from(turn: Turn) -> Self {
        Self {
            kind: turn.kind,
            content: turn.content,
            created_at: turn.created_at,
        }
    }
}

/// 历史响应
#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub turns: Vec<TurnResponse>,
    pub total: usize,
}
