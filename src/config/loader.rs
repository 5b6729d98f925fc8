use crate::config::config::AppConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::PathBuf;

/// 配置加载器
pub struct ConfigLoader;

impl ConfigLoader {
    /// 从默认路径加载配置
    ///
    /// 合并顺序（后者覆盖前者）：
    /// 1. 开发环境默认值
    /// 2. ./config.toml
    /// 3. `MEDASSIST_` 前缀的环境变量（`__` 分隔嵌套字段）
    pub fn load() -> Result<AppConfig, figment::Error> {
        Self::load_from(default_config_path())
    }

    /// 从指定路径加载配置
    pub fn load_from(path: PathBuf) -> Result<AppConfig, figment::Error> {
        Self::figment(path).extract()
    }

    fn figment(path: PathBuf) -> Figment {
        Figment::from(Serialized::defaults(AppConfig::development()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("MEDASSIST_").split("__"))
    }

    /// 验证配置
    pub fn validate(config: &AppConfig) -> Result<(), ConfigValidationError> {
        if config.server.port == 0 {
            return Err(ConfigValidationError::InvalidPort);
        }

        if config.dialogue.min_response_chars == 0 {
            return Err(ConfigValidationError::InvalidResponseFloor);
        }

        if config.completion.any_enabled() {
            if config.completion.base_url.trim().is_empty() {
                return Err(ConfigValidationError::MissingCompletionUrl);
            }
            if config.completion.timeout_secs == 0 {
                return Err(ConfigValidationError::InvalidTimeout);
            }
        }

        Ok(())
    }
}

/// 配置验证错误
#[derive(thiserror::Error, Debug)]
pub enum ConfigValidationError {
    #[error("服务端口无效，必须大于 0")]
    InvalidPort,

    #[error("回复最短字符数必须大于 0")]
    InvalidResponseFloor,

    #[error("已启用外部补全服务，但未配置服务地址")]
    MissingCompletionUrl,

    #[error("外部补全服务超时必须大于 0")]
    InvalidTimeout,
}

/// 获取默认配置文件路径
pub fn default_config_path() -> PathBuf {
    PathBuf::from("config.toml")
}
