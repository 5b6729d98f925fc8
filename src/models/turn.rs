use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 轮次类型
///
/// `Question` 是用户的输入，`Answer` 是助手的回复。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TurnKind {
    /// 用户提问
    Question,
    /// 助手回答
    Answer,
}

impl fmt::Display for TurnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnKind::Question => write!(f, "question"),
            TurnKind::Answer => write!(f, "answer"),
        }
    }
}

/// 对话轮次
///
/// 追加到会话历史后不可修改。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Turn {
    /// 轮次类型
    pub kind: TurnKind,

    /// 原始内容
    pub content: String,

    /// 创建时间
    pub created_at: DateTime<Utc>,
}

impl Turn {
    /// 创建新轮次
    pub fn new(kind: TurnKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
            created_at: Utc::now(),
        }
    }

    /// 创建用户提问轮次
    pub fn question(content: impl Into<String>) -> Self {
        Self::new(TurnKind::Question, content)
    }

    /// 创建助手回答轮次
    pub fn answer(content: impl Into<String>) -> Self {
        Self::new(TurnKind::Answer, content)
    }

    pub fn is_answer(&self) -> bool {
        self.kind == TurnKind::Answer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_constructors() {
        let q = Turn::question("I have a cough");
        let a = Turn::answer("How long have you been coughing?");
        assert_eq!(q.kind, TurnKind::Question);
        assert!(a.is_answer());
        assert!(!q.is_answer());
    }

    #[test]
    fn test_turn_kind_serializes_lowercase() {
        let json = serde_json::to_string(&TurnKind::Question).unwrap();
        assert_eq!(json, "\"question\"");
        assert_eq!(TurnKind::Answer.to_string(), "answer");
    }
}
