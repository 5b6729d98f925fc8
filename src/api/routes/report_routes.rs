//! Report Routes

use axum::{Router, routing::post};

use crate::api::app_state::AppState;
use crate::api::handlers::report_handler::*;

/// 创建报告分析路由器
pub fn create_report_router() -> Router<AppState> {
    Router::new().route("/analyze-report", post(analyze_report))
}
