//! 核心错误处理模块

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::error;

/// 对外统一的内部错误文案
pub const INTERNAL_ERROR_MESSAGE: &str = "Something went wrong";
/// 认证失败文案
pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized access";

/// 核心错误类型
#[derive(Debug)]
pub enum CoreError {
    BadRequest(String),
    Unauthorized,
    NotFound(String),
    InternalServerError(String),
}

/// 错误响应结构: `{"error": "..."}`
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

impl CoreError {
    pub fn status(&self) -> StatusCode {
        match self {
            CoreError::BadRequest(_) => StatusCode::BAD_REQUEST,
            CoreError::Unauthorized => StatusCode::UNAUTHORIZED,
            CoreError::NotFound(_) => StatusCode::NOT_FOUND,
            CoreError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoreError::BadRequest(msg) => write!(f, "{}", msg),
            CoreError::Unauthorized => write!(f, "{}", UNAUTHORIZED_MESSAGE),
            CoreError::NotFound(msg) => write!(f, "{}", msg),
            CoreError::InternalServerError(msg) => write!(f, "内部错误: {}", msg),
        }
    }
}

impl std::error::Error for CoreError {}

impl IntoResponse for CoreError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            CoreError::BadRequest(msg) | CoreError::NotFound(msg) => msg,
            CoreError::Unauthorized => UNAUTHORIZED_MESSAGE.to_string(),
            CoreError::InternalServerError(detail) => {
                // 细节只进日志，不回给客户端
                error!("Error: {}", detail);
                INTERNAL_ERROR_MESSAGE.to_string()
            }
        };

        (status, axum::Json(ErrorResponse::new(message))).into_response()
    }
}
