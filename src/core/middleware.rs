//! 核心中间件模块

use std::{any::Any, sync::Arc, time::Instant};

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{SecondsFormat, Utc};
use tracing::{debug, error, info, warn};

use super::error::{CoreError, ErrorResponse, INTERNAL_ERROR_MESSAGE};

/// 请求日志中间件
///
/// 分发之前输出 `[时间戳] METHOD /path`，不改变请求与响应。
pub async fn request_logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    info!(
        "[{}] {} {}",
        Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        method,
        path
    );

    let response = next.run(req).await;

    debug!(
        "{} {} - {} - {}ms",
        method,
        path,
        response.status(),
        start.elapsed().as_millis()
    );

    response
}

/// 受保护路由所需的 `Authorization` 头完整取值
#[derive(Clone, Debug)]
pub struct BearerToken(Arc<str>);

impl BearerToken {
    pub fn new(token: &str) -> Self {
        Self(Arc::from(format!("Bearer {}", token)))
    }

    /// 头部取值必须与 `Bearer <token>` 完全相等
    pub fn matches(&self, header: Option<&str>) -> bool {
        header == Some(&*self.0)
    }
}

/// 认证中间件
pub async fn auth_middleware(
    State(token): State<BearerToken>,
    req: Request,
    next: Next,
) -> Result<Response, CoreError> {
    let auth_header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    if !token.matches(auth_header) {
        warn!("拒绝未认证请求: {} {}", req.method(), req.uri().path());
        return Err(CoreError::Unauthorized);
    }

    Ok(next.run(req).await)
}

/// 处理器 panic 时的兜底响应，配合 `CatchPanicLayer` 使用
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    error!("Error: {}", detail);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(INTERNAL_ERROR_MESSAGE)),
    )
        .into_response()
}
