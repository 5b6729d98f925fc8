//! Handlers 模块
//!
//! HTTP 请求处理程序。

pub mod auth_handler;
pub mod chat_handler;
pub mod report_handler;

pub use auth_handler::*;
pub use chat_handler::*;
pub use report_handler::*;
