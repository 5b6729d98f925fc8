//! 文档文本提取模块
//!
//! 按文件扩展名识别格式，再交给已注册的提取器得到纯文本。

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::{AppError, Result};

/// 支持上传的文档格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentFormat {
    Pdf,
    Doc,
    Docx,
    Txt,
}

impl DocumentFormat {
    /// 根据文件名扩展名（不区分大小写）识别格式
    pub fn from_filename(filename: &str) -> Result<Self> {
        let extension = filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "pdf" => Ok(DocumentFormat::Pdf),
            "doc" => Ok(DocumentFormat::Doc),
            "docx" => Ok(DocumentFormat::Docx),
            "txt" => Ok(DocumentFormat::Txt),
            _ => Err(AppError::UnsupportedFormat(format!(
                "Unsupported file format: {}",
                filename
            ))),
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Doc => "doc",
            DocumentFormat::Docx => "docx",
            DocumentFormat::Txt => "txt",
        };
        f.write_str(name)
    }
}

/// 文本提取器 trait
pub trait TextExtractor: Send + Sync {
    fn extract(&self, bytes: &[u8]) -> Result<String>;
}

/// UTF-8 纯文本提取器
#[derive(Debug, Default, Clone)]
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        String::from_utf8(bytes.to_vec())
            .map_err(|e| AppError::Extraction(format!("file is not valid UTF-8: {}", e)))
    }
}

/// 提取器注册表
#[derive(Clone)]
pub struct ExtractorRegistry {
    extractors: HashMap<DocumentFormat, Arc<dyn TextExtractor>>,
}

impl fmt::Debug for ExtractorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut formats: Vec<String> = self.extractors.keys().map(|k| k.to_string()).collect();
        formats.sort();
        f.debug_struct("ExtractorRegistry")
            .field("formats", &formats)
            .finish()
    }
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(DocumentFormat::Txt, Arc::new(PlainTextExtractor));
        registry
    }
}

impl ExtractorRegistry {
    /// 不含任何提取器的注册表
    pub fn empty() -> Self {
        Self {
            extractors: HashMap::new(),
        }
    }

    /// 注册（或替换）某个格式的提取器
    pub fn register(&mut self, format: DocumentFormat, extractor: Arc<dyn TextExtractor>) {
        self.extractors.insert(format, extractor);
    }

    pub fn supports(&self, format: DocumentFormat) -> bool {
        self.extractors.contains_key(&format)
    }

    /// 识别格式并提取文本
    ///
    /// 提取结果为空白时返回 `Validation`。
    pub fn extract(&self, filename: &str, bytes: &[u8]) -> Result<String> {
        let format = DocumentFormat::from_filename(filename)?;
        let extractor = self.extractors.get(&format).ok_or_else(|| {
            AppError::Extraction(format!("no text extractor available for {} files", format))
        })?;

        let text = extractor.extract(bytes)?;
        if text.trim().is_empty() {
            return Err(AppError::Validation(
                "Could not extract text from file".to_string(),
            ));
        }

        tracing::debug!(%format, chars = text.chars().count(), "extracted report text");
        Ok(text)
    }
}

/// 清理展示用文件名：去掉路径部分，替换不安全字符
pub fn sanitize_filename(filename: &str) -> String {
    let base = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();

    let cleaned: String = base
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let cleaned = cleaned.trim_start_matches('.').to_string();
    if cleaned.is_empty() {
        "report".to_string()
    } else {
        cleaned
    }
}
