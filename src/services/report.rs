//! 报告分析服务

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

use crate::engine::ReportAnalyzer;
use crate::error::{AppError, Result};
use crate::extraction::{ExtractorRegistry, sanitize_filename};
use crate::upstream::{CompletionClient, extract_completion_text, prompt};

/// 报告分析结果
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportReply {
    /// Markdown 格式的分析文本
    pub analysis: String,
    /// 是否为规则分析
    pub is_fallback: bool,
}

/// 报告分析服务 trait
#[async_trait]
pub trait ReportService: Send + Sync {
    /// 提取上传文件的文本并给出分析
    async fn analyze_report(&self, session_id: &str, filename: &str, bytes: &[u8]) -> Result<ReportReply>;
}

/// 报告分析服务实现
pub struct ReportServiceImpl {
    analyzer: ReportAnalyzer,
    extractors: ExtractorRegistry,
    client: Arc<dyn CompletionClient>,
    use_completion: bool,
}

impl ReportServiceImpl {
    pub fn new(
        extractors: ExtractorRegistry,
        client: Arc<dyn CompletionClient>,
        use_completion: bool,
    ) -> Self {
        Self {
            analyzer: ReportAnalyzer::new(),
            extractors,
            client,
            use_completion,
        }
    }

    async fn complete(&self, text: &str) -> Result<String> {
        let payload = self.client.chat_complete(&prompt::report_messages(text)).await?;
        extract_completion_text(&payload)
    }
}

#[async_trait]
impl ReportService for ReportServiceImpl {
    async fn analyze_report(&self, session_id: &str, filename: &str, bytes: &[u8]) -> Result<ReportReply> {
        if filename.trim().is_empty() {
            return Err(AppError::Validation("No file selected".to_string()));
        }

        let display_name = sanitize_filename(filename);
        let text = self.extractors.extract(&display_name, bytes)?;
        info!(session_id, file = %display_name, "analyzing report");

        if self.use_completion {
            match self.complete(&text).await {
                Ok(analysis) => {
                    return Ok(ReportReply {
                        analysis,
                        is_fallback: false,
                    });
                }
                Err(e) => warn!(error = %e, "completion service failed, using rule-based analysis"),
            }
        }

        Ok(ReportReply {
            analysis: self.analyzer.render(&text, &display_name),
            is_fallback: true,
        })
    }
}

/// 创建报告分析服务
pub fn create_report_service(
    extractors: ExtractorRegistry,
    client: Arc<dyn CompletionClient>,
    use_completion: bool,
) -> Box<dyn ReportService> {
    Box::new(ReportServiceImpl::new(extractors, client, use_completion))
}
