//! 服务模块

pub mod account;
pub mod chat;
pub mod report;

pub use account::{AccountService, AccountServiceImpl, create_account_service};
pub use chat::{ChatReply, ChatService, ChatServiceImpl, create_chat_service};
pub use report::{ReportReply, ReportService, ReportServiceImpl, create_report_service};
