//! 账号服务
//!
//! 注册、登录与令牌校验。登录成功会创建新会话，会话 ID 即访问令牌。

use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use crate::config::config::SeedUser;
use crate::error::{AppError, Result};
use crate::models::Session;
use crate::storage::AccountStore;

/// 账号服务 trait
#[async_trait]
pub trait AccountService: Send + Sync {
    /// 注册新用户
    async fn register(&self, username: &str, password: &str) -> Result<()>;

    /// 登录，返回新会话
    async fn login(&self, username: &str, password: &str) -> Result<Session>;

    /// 校验令牌，返回所属会话
    async fn verify(&self, token: &str) -> Result<Session>;
}

/// 账号服务实现
pub struct AccountServiceImpl {
    store: Arc<dyn AccountStore>,
}

impl AccountServiceImpl {
    pub fn new(store: Arc<dyn AccountStore>) -> Self {
        Self { store }
    }

    /// 注册预置账户，已存在的用户名跳过
    pub async fn seed(&self, users: &[SeedUser]) -> Result<()> {
        for user in users {
            if self.store.insert_user(&user.username, &user.password).await? {
                info!(username = %user.username, "seeded account");
            }
        }
        Ok(())
    }
}

fn require_credentials(username: &str, password: &str) -> Result<()> {
    if username.trim().is_empty() || password.is_empty() {
        return Err(AppError::Validation(
            "Username and password required".to_string(),
        ));
    }
    Ok(())
}

#[async_trait]
impl AccountService for AccountServiceImpl {
    async fn register(&self, username: &str, password: &str) -> Result<()> {
        require_credentials(username, password)?;
        if !self.store.insert_user(username, password).await? {
            return Err(AppError::Validation("User already exists".to_string()));
        }
        info!(username, "registered account");
        Ok(())
    }

    async fn login(&self, username: &str, password: &str) -> Result<Session> {
        require_credentials(username, password)?;
        match self.store.password_of(username).await? {
            Some(stored) if stored == password => {
                let session = Session::new(username);
                self.store.put_session(session.clone()).await?;
                info!(username, session_id = %session.id, "login successful");
                Ok(session)
            }
            _ => Err(AppError::Authentication("Invalid credentials".to_string())),
        }
    }

    async fn verify(&self, token: &str) -> Result<Session> {
        if token.is_empty() {
            return Err(AppError::Authentication("Unauthorized".to_string()));
        }
        self.store
            .find_session(token)
            .await?
            .ok_or_else(|| AppError::Authentication("Unauthorized".to_string()))
    }
}

/// 创建账号服务并注册预置账户
pub async fn create_account_service(
    store: Arc<dyn AccountStore>,
    seed_users: &[SeedUser],
) -> Result<Box<dyn AccountService>> {
    let service = AccountServiceImpl::new(store);
    service.seed(seed_users).await?;
    Ok(Box::new(service))
}
