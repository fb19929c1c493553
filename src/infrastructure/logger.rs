//! 日志基础设施

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

pub struct Logger;

impl Logger {
    /// 初始化全局日志，`RUST_LOG` 优先于配置中的级别
    ///
    /// 全局订阅者已存在时返回错误。
    pub fn init(level: &str) -> Result<()> {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("{},tower_http=info", level)));

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .try_init()
            .map_err(|e| anyhow!("日志初始化失败: {}", e))
    }
}
