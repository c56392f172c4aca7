//! # demo-api
//!
//! 内存演示 REST API：用户、产品两个内存存储，外加健康检查与统计接口。
//!
//! 分层结构：
//! - `app`：处理器、业务服务、数据模型
//! - `core`：错误、响应包装、中间件、请求解析
//! - `infrastructure`：配置与日志
//!
//! 所有请求依次经过：安全响应头 → CORS → 压缩 → 访问日志 → JSON 请求体解码 → 处理器。

pub mod app;
pub mod core;
pub mod infrastructure;

use axum::{
    middleware,
    routing::get,
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::app::{products, state::AppState, system, users};
use crate::core::middleware::{
    endpoint_not_found, handle_panic, json_body_middleware, request_logging_middleware,
    security_headers,
};

/// 构建完整应用：路由 + 中间件链
pub fn build_router(state: AppState) -> Router {
    apply_middleware(routes(state))
}

/// 仅路由，不含中间件
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/health",
            get(system::handler::health_check).fallback(endpoint_not_found),
        )
        .route(
            "/api/v1/users",
            get(users::handler::list_users)
                .post(users::handler::create_user)
                .fallback(endpoint_not_found),
        )
        .route(
            "/api/v1/users/:id",
            get(users::handler::get_user).fallback(endpoint_not_found),
        )
        .route(
            "/api/v1/products",
            get(products::handler::list_products)
                .post(products::handler::create_product)
                .fallback(endpoint_not_found),
        )
        .route(
            "/api/v1/products/:id",
            get(products::handler::get_product).fallback(endpoint_not_found),
        )
        .route(
            "/api/v1/stats",
            get(system::handler::stats).fallback(endpoint_not_found),
        )
        .fallback(endpoint_not_found)
        .with_state(state)
}

/// 挂载中间件链；最后挂载的层最先执行
pub fn apply_middleware(router: Router) -> Router {
    let router = router
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(middleware::from_fn(json_body_middleware))
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    security_headers(router)
}
