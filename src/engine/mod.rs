//! 规则推理引擎
//!
//! 外部补全服务不可用时的确定性兜底：
//! - 对话引擎：结构化回答解析、症状分类、追问检测与回复合成
//! - 报告分析：报告类型识别、化验值提取、异常描述检测

pub mod classifier;
pub mod dialogue;
pub mod report;
pub mod structured;
pub mod synthesizer;

pub use classifier::{Guidance, Route, classify};
pub use dialogue::{DialogueEngine, DialogueOutcome};
pub use report::ReportAnalyzer;
pub use structured::{ParsedUtterance, StructuredAnswer, parse_utterance};
