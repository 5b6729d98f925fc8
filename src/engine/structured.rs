//! 结构化回答解析
//!
//! 引导式问答界面会把多个回答拼成 `问题: 回答` 段落，段落之间用空行分隔。

use std::collections::BTreeMap;

/// 问题文本到回答文本的映射
///
/// 使用有序映射，保证基于键的遍历（如症状词提取）结果确定。
pub type StructuredAnswer = BTreeMap<String, String>;

const SECTION_BREAK: &str = "\n\n";

/// 解析结果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedUtterance {
    pub is_structured: bool,
    pub answers: StructuredAnswer,
}

/// 解析用户输入
///
/// 含空行即视为结构化回答；每个含冒号的段落按第一个冒号拆分，
/// 不含冒号的段落丢弃，重复的问题以后出现的为准。
pub fn parse_utterance(utterance: &str) -> ParsedUtterance {
    let normalized = utterance.replace("\r\n", "\n");
    if !normalized.contains(SECTION_BREAK) {
        return ParsedUtterance::default();
    }

    let answers = normalized
        .split(SECTION_BREAK)
        .filter_map(|section| section.split_once(':'))
        .map(|(question, answer)| (question.trim().to_string(), answer.trim().to_string()))
        .collect();

    ParsedUtterance {
        is_structured: true,
        answers,
    }
}
