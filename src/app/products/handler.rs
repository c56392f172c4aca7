//! 产品处理器

use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::{HeaderMap, StatusCode},
    response::Json,
    Extension,
};
use tracing::info;

use super::model::{CreateProductInput, Product, ProductQuery};
use crate::app::state::AppState;
use crate::core::{
    error::CoreError,
    extract::{consumer_name, parse_int_prefix, typed_body, JsonBody},
    response::{ApiResponse, ListResponse},
};

/// 查询参数按原始键值对读取，重复的键不会被拒绝
pub async fn list_products(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
    headers: HeaderMap,
) -> Result<Json<ListResponse<Product>>, CoreError> {
    let Query(pairs) = query.map_err(|e| CoreError::Internal(e.body_text()))?;
    let query = ProductQuery::from_pairs(pairs);
    let products = state.product_service.list_products(&query)?;
    Ok(Json(ListResponse::new(products, consumer_name(&headers))))
}

pub async fn get_product(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<ApiResponse<Product>>, CoreError> {
    let Path(id) = id.map_err(|e| CoreError::Internal(e.body_text()))?;
    let product = state.product_service.get_product(parse_int_prefix(&id))?;
    Ok(Json(ApiResponse::success(product)))
}

pub async fn create_product(
    State(state): State<AppState>,
    body: Option<Extension<JsonBody>>,
) -> Result<(StatusCode, Json<ApiResponse<Product>>), CoreError> {
    let input: CreateProductInput = typed_body(body.map(|Extension(body)| body))?;
    let product = state.product_service.create_product(input)?;
    info!(id = product.id, "产品已创建");
    Ok((StatusCode::CREATED, Json(ApiResponse::success(product))))
}
