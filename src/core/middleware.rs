//! 核心中间件模块

use std::any::Any;
use std::time::Instant;

use axum::{
    body::{to_bytes, Body},
    extract::Request,
    http::{
        header::{REFERER, USER_AGENT},
        HeaderName, HeaderValue, StatusCode,
    },
    middleware::Next,
    response::{IntoResponse, Response},
    Json, Router,
};
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::info;

use crate::core::error::{CoreError, ErrorResponse};
use crate::core::extract::{decode_json_value, is_json_content, JsonBody, JSON_BODY_LIMIT};

/// 每个响应都会带上的安全响应头 (处理器已设置的不覆盖)
pub const SECURITY_HEADERS: &[(&str, &str)] = &[
    (
        "content-security-policy",
        "default-src 'self';base-uri 'self';font-src 'self' https: data:;\
         form-action 'self';frame-ancestors 'self';img-src 'self' data:;\
         object-src 'none';script-src 'self';script-src-attr 'none';\
         style-src 'self' https: 'unsafe-inline';upgrade-insecure-requests",
    ),
    ("cross-origin-opener-policy", "same-origin"),
    ("cross-origin-resource-policy", "same-origin"),
    ("origin-agent-cluster", "?1"),
    ("referrer-policy", "no-referrer"),
    (
        "strict-transport-security",
        "max-age=15552000; includeSubDomains",
    ),
    ("x-content-type-options", "nosniff"),
    ("x-dns-prefetch-control", "off"),
    ("x-download-options", "noopen"),
    ("x-frame-options", "SAMEORIGIN"),
    ("x-permitted-cross-domain-policies", "none"),
    ("x-xss-protection", "0"),
];

/// 为路由挂上全部安全响应头
pub fn security_headers<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    SECURITY_HEADERS
        .iter()
        .fold(router, |router, &(name, value)| {
            router.layer(SetResponseHeaderLayer::if_not_present(
                HeaderName::from_static(name),
                HeaderValue::from_static(value),
            ))
        })
}

/// 请求日志中间件
pub async fn request_logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();
    let version = req.version();
    let user_agent = header_text(&req, USER_AGENT);
    let referrer = header_text(&req, REFERER);

    let response = next.run(req).await;
    let status = response.status();
    let duration = start.elapsed();

    info!(
        %method,
        %uri,
        ?version,
        status = status.as_u16(),
        latency_ms = duration.as_millis() as u64,
        user_agent = user_agent.as_deref().unwrap_or("-"),
        referrer = referrer.as_deref().unwrap_or("-"),
        "{} {} - {} - {}ms",
        method,
        uri,
        status,
        duration.as_millis(),
    );

    response
}

/// JSON 请求体解码中间件
///
/// 对所有路由生效：`Content-Type` 为 JSON 的请求体被完整读取并解码，
/// 结果以 [`JsonBody`] 放入请求扩展。超出上限或格式错误返回 500。
pub async fn json_body_middleware(req: Request, next: Next) -> Result<Response, CoreError> {
    if !is_json_content(req.headers()) {
        return Ok(next.run(req).await);
    }

    let (parts, body) = req.into_parts();
    let bytes = to_bytes(body, JSON_BODY_LIMIT)
        .await
        .map_err(|e| CoreError::Internal(format!("request entity too large: {e}")))?;
    let value = decode_json_value(&bytes)?;

    let mut req = Request::from_parts(parts, Body::from(bytes));
    req.extensions_mut().insert(JsonBody(value));
    Ok(next.run(req).await)
}

fn header_text(req: &Request, name: HeaderName) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|h| h.to_str().ok())
        .map(|s| s.to_string())
}

/// 未匹配路由的兜底处理器
pub async fn endpoint_not_found() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new("Endpoint not found")),
    )
}

/// 处理器 panic 时的兜底响应，与 [`CoreError::Internal`] 一致
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "handler panicked".to_string()
    };

    CoreError::Internal(message).into_response()
}
