//! Auth Routes
//!
//! 注册与登录，不需要令牌。

use axum::{Router, routing::post};

use crate::api::app_state::AppState;
use crate::api::handlers::auth_handler::*;

/// 创建认证路由器
pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}
