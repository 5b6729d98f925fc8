//! 对话引擎
//!
//! 组合结构化解析、分类器和合成器，对一条用户输入给出一条回复。
//! 不持有状态，历史由调用方传入。

use crate::config::config::DialogueConfig;
use crate::engine::classifier::{self, Route};
use crate::engine::structured::parse_utterance;
use crate::engine::synthesizer::{self, DEGENERATE_FALLBACK};
use crate::models::Turn;

/// 一次推理的结果
#[derive(Debug, Clone, PartialEq)]
pub struct DialogueOutcome {
    /// 回复文本，保证不短于配置的下限
    pub message: String,
    /// 输入是否为结构化回答
    pub structured: bool,
    /// 自由文本的分类结果；结构化回答为 None
    pub route: Option<Route>,
    /// 是否因回复过短被替换
    pub degenerate: bool,
}

/// 规则对话引擎
#[derive(Debug, Clone)]
pub struct DialogueEngine {
    config: DialogueConfig,
}

impl Default for DialogueEngine {
    fn default() -> Self {
        Self::new(DialogueConfig::default())
    }
}

impl DialogueEngine {
    pub fn new(config: DialogueConfig) -> Self {
        Self { config }
    }

    /// 对用户输入给出回复
    pub fn respond(&self, utterance: &str, history: &[Turn]) -> DialogueOutcome {
        let parsed = parse_utterance(utterance);

        let (message, route) = if parsed.is_structured {
            (synthesizer::synthesize_structured(&parsed.answers), None)
        } else {
            let route = classifier::classify(utterance, history, self.config.follow_up_window);
            (synthesizer::render(route), Some(route))
        };

        let (message, degenerate) = self.enforce_floor(message);

        DialogueOutcome {
            message,
            structured: parsed.is_structured,
            route,
            degenerate,
        }
    }

    /// 回复去除空白后短于下限时替换为通用回复
    pub fn enforce_floor(&self, message: String) -> (String, bool) {
        if self.meets_floor(&message) {
            (message, false)
        } else {
            tracing::warn!(
                len = message.trim().chars().count(),
                "synthesized response below length floor, using generic response"
            );
            (DEGENERATE_FALLBACK.to_string(), true)
        }
    }

    pub fn meets_floor(&self, message: &str) -> bool {
        message.trim().chars().count() >= self.config.min_response_chars
    }
}
