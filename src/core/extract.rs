//! 请求体提取器

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
};
use serde_json::{Map, Value};

use super::error::CoreError;

/// 宽松的 JSON 对象请求体
///
/// 请求体为空、不是 JSON 类型或顶层不是对象时视为 `{}`；
/// 声明为 JSON 却无法解析时返回 400。
#[derive(Debug, Default)]
pub struct JsonObject(pub Map<String, Value>);

fn is_json_content_type(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime == "application/json" || mime.ends_with("+json")
}

#[async_trait]
impl<S> FromRequest<S> for JsonObject
where
    S: Send + Sync,
{
    type Rejection = CoreError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(is_json_content_type)
            .unwrap_or(false);

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| CoreError::BadRequest(e.body_text()))?;

        if !is_json || bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        match serde_json::from_slice(&bytes) {
            Ok(Value::Object(map)) => Ok(Self(map)),
            Ok(_) => Ok(Self::default()),
            Err(e) => Err(CoreError::BadRequest(format!("Invalid JSON body: {}", e))),
        }
    }
}
