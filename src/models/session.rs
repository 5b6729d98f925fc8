use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 会话实体
///
/// 登录时创建，进程存活期间有效。`id` 同时作为不透明的访问令牌使用。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    /// 会话唯一标识（访问令牌）
    pub id: String,

    /// 所属用户名
    pub username: String,

    /// 会话创建时间
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// 为用户创建新会话
    pub fn new(username: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            username: username.to_string(),
            created_at: Utc::now(),
        }
    }
}
