//! 认证 DTO

use serde::{Deserialize, Serialize};

/// 注册 / 登录请求
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CredentialsRequest {
    pub username: String,
    pub password: String,
}

/// 注册响应
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub message: String,
}

/// 登录响应
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    /// 访问令牌，后续请求放在 Authorization 头中
    pub token: String,
}
