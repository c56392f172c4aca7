//! 应用状态

use std::sync::Arc;

use super::products::{model::seed_products, service::ProductService};
use super::users::{model::seed_users, service::UserService};

/// 默认的服务器标识，出现在统计接口中
pub const DEFAULT_SERVER_NAME: &str = "demo-api-v1";

/// 所有处理器共享的状态，每个实例拥有独立的存储
#[derive(Clone)]
pub struct AppState {
    pub user_service: UserService,
    pub product_service: ProductService,
    pub server_name: Arc<str>,
}

impl AppState {
    pub fn new(
        user_service: UserService,
        product_service: ProductService,
        server_name: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            user_service,
            product_service,
            server_name: server_name.into(),
        }
    }

    /// 带种子数据的状态：3 个用户、3 个产品
    pub fn with_seed_data(server_name: impl Into<Arc<str>>) -> Self {
        Self::new(
            UserService::new(seed_users()),
            ProductService::new(seed_products()),
            server_name,
        )
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_seed_data(DEFAULT_SERVER_NAME)
    }
}
