//! 会话历史存储
//!
//! 每个会话一条只追加的轮次序列。未知会话读取为空序列。

use async_trait::async_trait;
use dashmap::DashMap;

use crate::error::Result;
use crate::models::Turn;

/// 会话历史存储 trait
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// 读取会话全部轮次，按追加顺序
    async fn get(&self, session_id: &str) -> Result<Vec<Turn>>;

    /// 追加一个轮次
    async fn append(&self, session_id: &str, turn: Turn) -> Result<()>;

    /// 在同一把锁内追加一问一答
    async fn append_exchange(&self, session_id: &str, question: Turn, answer: Turn) -> Result<()>;

    /// 会话轮次数量
    async fn len(&self, session_id: &str) -> Result<usize> {
        Ok(self.get(session_id).await?.len())
    }
}

/// 基于 DashMap 的内存实现
#[derive(Debug, Default)]
pub struct InMemoryConversationStore {
    sessions: DashMap<String, Vec<Turn>>,
}

impl InMemoryConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 已有历史的会话数量
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }
}

#[async_trait]
impl ConversationStore for InMemoryConversationStore {
    async fn get(&self, session_id: &str) -> Result<Vec<Turn>> {
        Ok(self
            .sessions
            .get(session_id)
            .map(|turns| turns.value().clone())
            .unwrap_or_default())
    }

    async fn append(&self, session_id: &str, turn: Turn) -> Result<()> {
        self.sessions
            .entry(session_id.to_string())
            .or_default()
            .push(turn);
        Ok(())
    }

    async fn append_exchange(&self, session_id: &str, question: Turn, answer: Turn) -> Result<()> {
        let mut turns = self.sessions.entry(session_id.to_string()).or_default();
        turns.push(question);
        turns.push(answer);
        Ok(())
    }

    async fn len(&self, session_id: &str) -> Result<usize> {
        Ok(self.sessions.get(session_id).map(|t| t.len()).unwrap_or(0))
    }
}
