//! MedAssist - 症状分诊对话与医疗报告分析服务
//!
//! 外部补全服务不可用时，由确定性的规则引擎给出对话回复和报告分析。

pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod extraction;
pub mod models;
pub mod observability;
pub mod reference;
pub mod security;
pub mod services;
pub mod storage;
pub mod upstream;
