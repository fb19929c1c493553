//! 基础设施层: 配置、日志与内存存储

pub mod config;
pub mod logger;
pub mod memory_store;
