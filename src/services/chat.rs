//! 对话服务
//!
//! 读取会话历史、生成回复、追加一问一答。同一会话的请求串行执行，
//! 不同会话并行。

use async_trait::async_trait;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::engine::structured::parse_utterance;
use crate::engine::synthesizer::{FREE_TEXT_RECOVERY, STRUCTURED_RECOVERY};
use crate::engine::DialogueEngine;
use crate::error::{AppError, Result};
use crate::models::Turn;
use crate::storage::ConversationStore;
use crate::upstream::{CompletionClient, extract_completion_text, prompt};

/// 对话回复
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatReply {
    pub message: String,
    /// 回复是否来自兜底路径
    pub is_fallback: bool,
}

/// 对话服务 trait
#[async_trait]
pub trait ChatService: Send + Sync {
    /// 处理一条用户输入，并把问答追加到会话历史
    async fn handle_chat(&self, session_id: &str, utterance: &str) -> Result<ChatReply>;

    /// 读取会话历史
    async fn history(&self, session_id: &str) -> Result<Vec<Turn>>;
}

/// 对话服务实现
pub struct ChatServiceImpl {
    engine: DialogueEngine,
    store: Arc<dyn ConversationStore>,
    client: Arc<dyn CompletionClient>,
    use_completion: bool,
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl ChatServiceImpl {
    pub fn new(
        engine: DialogueEngine,
        store: Arc<dyn ConversationStore>,
        client: Arc<dyn CompletionClient>,
        use_completion: bool,
    ) -> Self {
        Self {
            engine,
            store,
            client,
            use_completion,
            locks: DashMap::new(),
        }
    }

    fn session_lock(&self, session_id: &str) -> Arc<Mutex<()>> {
        self.locks.entry(session_id.to_string()).or_default().clone()
    }

    /// 没有其他请求持有或等待时移除会话锁
    fn release_lock(&self, session_id: &str, lock: Arc<Mutex<()>>) {
        drop(lock);
        self.locks
            .remove_if(session_id, |_, held| Arc::strong_count(held) == 1);
    }

    #[cfg(test)]
    fn active_locks(&self) -> usize {
        self.locks.len()
    }

    async fn handle_locked(&self, session_id: &str, utterance: &str) -> Result<ChatReply> {
        let structured = parse_utterance(utterance).is_structured;
        let (message, is_fallback) = match self.store.get(session_id).await {
            Ok(history) => self.compose(utterance, &history, structured).await,
            Err(e) => {
                warn!(error = %e, session_id, "history unavailable, using recovery reply");
                let recovery = if structured {
                    STRUCTURED_RECOVERY
                } else {
                    FREE_TEXT_RECOVERY
                };
                (recovery.to_string(), true)
            }
        };

        self.store
            .append_exchange(session_id, Turn::question(utterance), Turn::answer(message.clone()))
            .await?;

        Ok(ChatReply {
            message,
            is_fallback,
        })
    }

    /// 外部补全服务生成回复
    async fn complete(&self, utterance: &str, history: &[Turn], structured: bool) -> Result<String> {
        let messages = prompt::chat_messages(utterance, history, structured);
        let payload = self.client.chat_complete(&messages).await?;
        let text = extract_completion_text(&payload)?;
        if !self.engine.meets_floor(&text) {
            return Err(AppError::Upstream("completion response too short".to_string()));
        }
        Ok(text)
    }

    /// 先尝试外部服务，失败时由规则引擎生成
    async fn compose(&self, utterance: &str, history: &[Turn], structured: bool) -> (String, bool) {
        if self.use_completion {
            match self.complete(utterance, history, structured).await {
                Ok(text) => return (text, false),
                Err(e) => warn!(error = %e, "completion service failed, using rule engine"),
            }
        }

        let outcome = self.engine.respond(utterance, history);
        match outcome.route {
            Some(route) => debug!(%route, degenerate = outcome.degenerate, "rule engine reply"),
            None => debug!(degenerate = outcome.degenerate, "rule engine structured reply"),
        }
        (outcome.message, self.use_completion)
    }
}

#[async_trait]
impl ChatService for ChatServiceImpl {
    async fn handle_chat(&self, session_id: &str, utterance: &str) -> Result<ChatReply> {
        if utterance.trim().is_empty() {
            return Err(AppError::Validation("Empty message".to_string()));
        }

        let lock = self.session_lock(session_id);
        let result = {
            let _guard = lock.lock().await;
            self.handle_locked(session_id, utterance).await
        };
        self.release_lock(session_id, lock);
        result
    }

    async fn history(&self, session_id: &str) -> Result<Vec<Turn>> {
        self.store.get(session_id).await
    }
}

/// 创建对话服务
pub fn create_chat_service(
    engine: DialogueEngine,
    store: Arc<dyn ConversationStore>,
    client: Arc<dyn CompletionClient>,
    use_completion: bool,
) -> Box<dyn ChatService> {
    Box::new(ChatServiceImpl::new(engine, store, client, use_completion))
}
