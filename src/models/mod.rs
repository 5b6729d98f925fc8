//! 核心数据模型模块
//!
//! 定义 MedAssist 的核心数据结构：Session, Turn, StructuredAnswer, ReportAnalysis。

pub mod report;
pub mod session;
pub mod turn;

pub use report::*;
pub use session::*;
pub use turn::*;
