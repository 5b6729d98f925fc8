//! 报告分析 DTO

use serde::{Deserialize, Serialize};

/// 报告分析响应
#[derive(Debug, Serialize, Deserialize)]
pub struct ReportResponse {
    /// Markdown 格式的分析
    pub analysis: String,
    pub is_fallback: bool,
}
