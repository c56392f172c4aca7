//! 核心错误处理模块

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;

/// 核心错误类型
///
/// 只有两类：按 id 查找失败 (404)，以及其它一切处理失败 (500)。
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Internal(String),
}

/// 错误响应结构
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            message: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: "Internal server error".to_string(),
            message: Some(message.into()),
        }
    }
}

impl IntoResponse for CoreError {
    fn into_response(self) -> Response {
        match self {
            CoreError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, Json(ErrorResponse::new(msg))).into_response()
            }
            CoreError::Internal(msg) => {
                error!(message = %msg, "请求处理失败");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::internal(msg)),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_omits_message() {
        let body = serde_json::to_value(ErrorResponse::new("User not found")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "success": false, "error": "User not found" })
        );
    }

    #[test]
    fn test_internal_carries_message() {
        let body = serde_json::to_value(ErrorResponse::internal("boom")).unwrap();
        assert_eq!(body["error"], "Internal server error");
        assert_eq!(body["message"], "boom");
        assert_eq!(body["success"], false);
    }

    #[test]
    fn test_status_codes() {
        let resp = CoreError::NotFound("x".into()).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = CoreError::Internal("x".into()).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
