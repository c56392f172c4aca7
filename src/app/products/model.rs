//! 产品数据模型

use serde::{Deserialize, Serialize};

use crate::app::users::model::non_empty_or;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub category: String,
}

/// 创建产品请求，所有字段可选
#[derive(Debug, Default, Deserialize)]
pub struct CreateProductInput {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
}

impl CreateProductInput {
    pub const DEFAULT_NAME: &'static str = "New Product";
    pub const DEFAULT_CATEGORY: &'static str = "General";

    /// 补齐默认值；价格不做非负校验
    pub fn into_product(self, id: i64) -> Product {
        Product {
            id,
            name: non_empty_or(self.name, Self::DEFAULT_NAME),
            price: self.price.unwrap_or(0.0),
            category: non_empty_or(self.category, Self::DEFAULT_CATEGORY),
        }
    }
}

/// 产品列表查询参数
///
/// 同一个键可以出现多次，按出现顺序保留全部取值。
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ProductQuery {
    pub category: Vec<String>,
    pub min_price: Vec<String>,
    pub max_price: Vec<String>,
}

impl ProductQuery {
    /// 从查询字符串的键值对构建，忽略未知的键
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut query = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "category" => query.category.push(value),
                "minPrice" => query.min_price.push(value),
                "maxPrice" => query.max_price.push(value),
                _ => {}
            }
        }
        query
    }
}

/// 启动时的种子产品
pub fn seed_products() -> Vec<Product> {
    vec![
        Product {
            id: 1,
            name: "Product A".to_string(),
            price: 99.99,
            category: "Electronics".to_string(),
        },
        Product {
            id: 2,
            name: "Product B".to_string(),
            price: 149.99,
            category: "Clothing".to_string(),
        },
        Product {
            id: 3,
            name: "Product C".to_string(),
            price: 79.99,
            category: "Books".to_string(),
        },
    ]
}
