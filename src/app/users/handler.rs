//! 用户处理器

use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::{HeaderMap, StatusCode},
    response::Json,
    Extension,
};
use tracing::info;

use super::model::{CreateUserInput, User};
use crate::app::state::AppState;
use crate::core::{
    error::CoreError,
    extract::{consumer_name, parse_int_prefix, typed_body, JsonBody},
    response::{ApiResponse, ListResponse},
};

pub async fn list_users(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ListResponse<User>>, CoreError> {
    info!(?headers, "请求头");
    let users = state.user_service.list_users()?;
    Ok(Json(ListResponse::new(users, consumer_name(&headers))))
}

pub async fn get_user(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<ApiResponse<User>>, CoreError> {
    let Path(id) = id.map_err(|e| CoreError::Internal(e.body_text()))?;
    let user = state.user_service.get_user(parse_int_prefix(&id))?;
    Ok(Json(ApiResponse::success(user)))
}

pub async fn create_user(
    State(state): State<AppState>,
    body: Option<Extension<JsonBody>>,
) -> Result<(StatusCode, Json<ApiResponse<User>>), CoreError> {
    let input: CreateUserInput = typed_body(body.map(|Extension(body)| body))?;
    let user = state.user_service.create_user(input)?;
    info!(id = user.id, "用户已创建");
    Ok((StatusCode::CREATED, Json(ApiResponse::success(user))))
}
