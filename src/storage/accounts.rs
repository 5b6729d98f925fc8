//! 账号与会话令牌存储

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::error::Result;
use crate::models::Session;

/// 账号存储 trait
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// 新建账号；用户名已存在时返回 false
    async fn insert_user(&self, username: &str, password: &str) -> Result<bool>;

    /// 读取账号密码
    async fn password_of(&self, username: &str) -> Result<Option<String>>;

    /// 保存会话
    async fn put_session(&self, session: Session) -> Result<()>;

    /// 按令牌查找会话
    async fn find_session(&self, token: &str) -> Result<Option<Session>>;
}

/// 基于 DashMap 的内存实现
///
/// 密码按原样保存，令牌只做不透明的相等比较。
#[derive(Debug, Default)]
pub struct InMemoryAccountStore {
    users: DashMap<String, String>,
    sessions: DashMap<String, Session>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn insert_user(&self, username: &str, password: &str) -> Result<bool> {
        match self.users.entry(username.to_string()) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(password.to_string());
                Ok(true)
            }
        }
    }

    async fn password_of(&self, username: &str) -> Result<Option<String>> {
        Ok(self.users.get(username).map(|p| p.value().clone()))
    }

    async fn put_session(&self, session: Session) -> Result<()> {
        self.sessions.insert(session.id.clone(), session);
        Ok(())
    }

    async fn find_session(&self, token: &str) -> Result<Option<Session>> {
        Ok(self.sessions.get(token).map(|s| s.value().clone()))
    }
}
