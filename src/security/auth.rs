//! 令牌提取
//!
//! `Authorization` 头直接携带登录返回的令牌，也接受 `Bearer ` 前缀。

use axum::http::{HeaderMap, header};

use crate::error::{AppError, Result};

/// 访问令牌
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub token: Option<String>,
}

impl Credentials {
    pub fn new(token: Option<String>) -> Self {
        Self { token }
    }

    /// 从 Authorization 头解析令牌
    pub fn from_authorization_header(auth_header: Option<&str>) -> Self {
        let token = auth_header
            .map(str::trim)
            .map(|h| h.strip_prefix("Bearer ").unwrap_or(h).trim())
            .filter(|t| !t.is_empty())
            .map(str::to_string);
        Self::new(token)
    }

    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self::from_authorization_header(
            headers
                .get(header::AUTHORIZATION)
                .and_then(|h| h.to_str().ok()),
        )
    }

    pub fn require_token(&self) -> Result<&str> {
        self.token
            .as_deref()
            .ok_or_else(|| AppError::Authentication("Unauthorized".to_string()))
    }
}
