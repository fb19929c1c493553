//! 配置基础设施
//!
//! 加载顺序: 默认值 -> TOML 配置文件（可选）-> 环境变量。

use serde::{Deserialize, Serialize};
use std::{env, fs, net::SocketAddr, path::Path};

/// 配置文件路径环境变量
pub const CONFIG_PATH_ENV: &str = "APP_CONFIG";

/// 服务配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// 绑定地址
    pub bind_address: String,
    /// HTTP 服务端口
    pub port: u16,
    /// 受保护路由使用的共享令牌
    pub auth_token: String,
    /// 日志级别 (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 3000,
            auth_token: "mysecrettoken".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// 按 `APP_CONFIG` 指向的文件与进程环境变量加载配置
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::load_from_file(path)?,
            Err(_) => Self::default(),
        };
        config.apply_overrides(|key| env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// 从配置文件加载配置，缺省字段取默认值
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::FileRead(e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// 用 `lookup` 提供的变量覆盖配置
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.bind_address = host;
        }
        if let Some(port) = lookup("PORT") {
            self.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::Env(format!("PORT 不是合法端口: {}", port)))?;
        }
        if let Some(token) = lookup("API_TOKEN") {
            self.auth_token = token;
        }
        if let Some(level) = lookup("LOG_LEVEL") {
            self.log_level = level.to_lowercase();
        }
        Ok(())
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::Validation("HTTP端口必须大于0".to_string()));
        }
        if self.bind_address.is_empty() {
            return Err(ConfigError::Validation("绑定地址不能为空".to_string()));
        }
        if self.auth_token.is_empty() {
            return Err(ConfigError::Validation("认证令牌不能为空".to_string()));
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(ConfigError::Validation(format!(
                "无效的日志级别: {}",
                self.log_level
            )));
        }

        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.bind_address, self.port)
            .parse()
            .map_err(|e| ConfigError::Validation(format!("无效的监听地址: {}", e)))
    }
}

/// 配置错误类型
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("文件读取错误: {0}")]
    FileRead(String),
    #[error("配置解析错误: {0}")]
    Parse(String),
    #[error("环境变量错误: {0}")]
    Env(String),
    #[error("配置验证错误: {0}")]
    Validation(String),
}
