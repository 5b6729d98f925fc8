use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// 服务地址
    pub host: String,
    /// 服务端口
    pub port: u16,
    /// 上传文件大小上限（字节）
    pub max_upload_bytes: usize,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别
    pub level: String,
    /// 结构化日志格式
    pub structured: bool,
    /// 日志文件目录（按天滚动）
    pub log_dir: Option<PathBuf>,
}

/// 外部补全服务配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CompletionConfig {
    /// 对话是否先请求外部服务
    pub chat_enabled: bool,
    /// 报告分析是否先请求外部服务
    pub report_enabled: bool,
    /// 服务地址
    pub base_url: String,
    /// 模型名称
    pub model: String,
    /// API 密钥
    pub api_key: Option<String>,
    /// 账户 ID
    pub account_id: Option<String>,
    /// 请求超时（秒）
    pub timeout_secs: u64,
}

impl CompletionConfig {
    /// 是否有任一路径启用了外部服务
    pub fn any_enabled(&self) -> bool {
        self.chat_enabled || self.report_enabled
    }
}

/// 对话引擎配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogueConfig {
    /// 回复最短字符数，低于此值替换为通用回复
    pub min_response_chars: usize,
    /// 追问检测时向前扫描的回答轮次数；None 表示不限
    pub follow_up_window: Option<usize>,
}

impl Default for DialogueConfig {
    fn default() -> Self {
        Self {
            min_response_chars: 10,
            follow_up_window: None,
        }
    }
}

/// 预置账户
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SeedUser {
    pub username: String,
    pub password: String,
}

/// 认证配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AuthConfig {
    /// 启动时注册的账户
    pub seed_users: Vec<SeedUser>,
}

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// 服务器配置
    pub server: ServerConfig,
    /// 日志配置
    pub logging: LoggingConfig,
    /// 外部补全服务配置
    pub completion: CompletionConfig,
    /// 对话引擎配置
    pub dialogue: DialogueConfig,
    /// 认证配置
    pub auth: AuthConfig,
    /// 应用名称
    pub app_name: String,
    /// 环境
    pub environment: String,
}

impl AppConfig {
    /// 创建开发环境配置
    pub fn development() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".into(),
                port: 5000,
                max_upload_bytes: 10 * 1024 * 1024,
            },
            logging: LoggingConfig {
                level: "debug".into(),
                structured: false,
                log_dir: None,
            },
            completion: CompletionConfig {
                chat_enabled: false,
                report_enabled: false,
                base_url: "http://localhost:8000".into(),
                model: "default".into(),
                api_key: None,
                account_id: None,
                timeout_secs: 30,
            },
            dialogue: DialogueConfig::default(),
            auth: AuthConfig {
                seed_users: vec![SeedUser {
                    username: "test".into(),
                    password: "test123".into(),
                }],
            },
            app_name: "medassist".into(),
            environment: "development".into(),
        }
    }

    /// 创建生产环境配置
    pub fn production() -> Self {
        let mut config = Self::development();
        config.environment = "production".into();
        config.logging.level = "info".into();
        config.logging.structured = true;
        config.auth.seed_users.clear();
        config
    }
}
