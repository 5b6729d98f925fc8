//! 存储层模块
//!
//! 会话历史与账号均保存在进程内存中，进程重启后丢失。

pub mod accounts;
pub mod history;

pub use accounts::{AccountStore, InMemoryAccountStore};
pub use history::{ConversationStore, InMemoryConversationStore};
