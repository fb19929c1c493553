//! 核心响应处理模块

use serde::{Deserialize, Serialize};

/// 删除成功后的响应结构
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse<T> {
    pub message: String,
    pub deleted: Vec<T>,
}

impl<T> DeleteResponse<T> {
    pub fn new(message: &str, deleted: Vec<T>) -> Self {
        Self {
            message: message.to_string(),
            deleted,
        }
    }
}
