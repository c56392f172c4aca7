//! 健康检查与统计处理器

use axum::{extract::State, response::Json};
use serde::Serialize;

use crate::app::state::AppState;
use crate::core::{
    error::CoreError,
    response::{iso_timestamp, ApiResponse},
};

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_users: usize,
    pub total_products: usize,
    pub timestamp: String,
    pub server: String,
}

/// 健康检查，无副作用
pub async fn health_check() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "healthy",
        timestamp: iso_timestamp(),
    })
}

pub async fn stats(State(state): State<AppState>) -> Result<Json<ApiResponse<Stats>>, CoreError> {
    Ok(Json(ApiResponse::success(Stats {
        total_users: state.user_service.count()?,
        total_products: state.product_service.count()?,
        timestamp: iso_timestamp(),
        server: state.server_name.to_string(),
    })))
}
