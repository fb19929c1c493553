//! # Product API
//!
//! 基于 Axum 的产品 CRUD 服务，数据保存在进程内存中：
//! - 应用层 (`app`): 路由与产品处理器
//! - 核心层 (`core`): 错误、响应结构、中间件
//! - 基础设施层 (`infrastructure`): 配置、日志、内存存储

pub mod app;
pub mod core;
pub mod infrastructure;

pub use crate::app::{
    build_router,
    product::{
        handler::AppState,
        model::Product,
        service::{ProductService, ProductStore},
    },
};
pub use crate::core::error::CoreError;
pub use crate::infrastructure::config::{AppConfig, ConfigError};
