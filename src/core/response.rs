//! 核心响应处理模块

use chrono::{SecondsFormat, Utc};
use serde::Serialize;

/// API 响应结构
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// 列表响应结构，附带数量和调用方
#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub success: bool,
    pub data: Vec<T>,
    pub count: usize,
    pub consumer: String,
}

impl<T> ListResponse<T> {
    pub fn new(data: Vec<T>, consumer: String) -> Self {
        Self {
            success: true,
            count: data.len(),
            data,
            consumer,
        }
    }
}

/// 当前 UTC 时间，毫秒精度，`Z` 结尾 (例如 `2024-05-01T12:00:00.000Z`)
pub fn iso_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
