//! 产品业务服务

use std::sync::{Arc, RwLock};

use super::model::{CreateProductInput, Product, ProductQuery};
use crate::core::{error::CoreError, extract::parse_float_prefix};

/// 内存产品存储，克隆后共享同一份数据
#[derive(Clone)]
pub struct ProductService {
    products: Arc<RwLock<Vec<Product>>>,
}

impl ProductService {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products: Arc::new(RwLock::new(products)),
        }
    }

    /// 依次按分类、最低价、最高价过滤。
    ///
    /// 空参数不参与过滤。价格参数解析为 `NaN` 时比较恒为假，结果为空。
    /// 重复的分类参数不与任何分类相等；重复的价格参数取第一个值。
    pub fn list_products(&self, query: &ProductQuery) -> Result<Vec<Product>, CoreError> {
        let mut filtered = self.products.read().map_err(|_| poisoned())?.clone();

        match query.category.as_slice() {
            [] => {}
            [single] if single.is_empty() => {}
            [single] => filtered.retain(|p| &p.category == single),
            _ => filtered.clear(),
        }
        if let Some(min_price) = price_bound(&query.min_price) {
            filtered.retain(|p| p.price >= min_price);
        }
        if let Some(max_price) = price_bound(&query.max_price) {
            filtered.retain(|p| p.price <= max_price);
        }

        Ok(filtered)
    }

    pub fn get_product(&self, id: Option<i64>) -> Result<Product, CoreError> {
        let products = self.products.read().map_err(|_| poisoned())?;
        id.and_then(|id| products.iter().find(|p| p.id == id))
            .cloned()
            .ok_or_else(|| CoreError::NotFound("Product not found".to_string()))
    }

    /// 追加新产品，id 取当前长度 + 1
    pub fn create_product(&self, input: CreateProductInput) -> Result<Product, CoreError> {
        let mut products = self.products.write().map_err(|_| poisoned())?;
        let product = input.into_product(products.len() as i64 + 1);
        products.push(product.clone());
        Ok(product)
    }

    pub fn count(&self) -> Result<usize, CoreError> {
        Ok(self.products.read().map_err(|_| poisoned())?.len())
    }
}

/// 多个取值按逗号拼接后解析，结果等于第一个值的数字前缀
fn price_bound(values: &[String]) -> Option<f64> {
    match values {
        [] => None,
        [single] if single.is_empty() => None,
        [single] => Some(parse_float_prefix(single)),
        _ => Some(parse_float_prefix(&values.join(","))),
    }
}

fn poisoned() -> CoreError {
    CoreError::Internal("product store lock poisoned".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::products::model::seed_products;

    fn query(category: Option<&str>, min: Option<&str>, max: Option<&str>) -> ProductQuery {
        ProductQuery {
            category: category.map(str::to_string).into_iter().collect(),
            min_price: min.map(str::to_string).into_iter().collect(),
            max_price: max.map(str::to_string).into_iter().collect(),
        }
    }

    fn ids(products: &[Product]) -> Vec<i64> {
        products.iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_no_filters_returns_all() {
        let service = ProductService::new(seed_products());
        let all = service.list_products(&ProductQuery::default()).unwrap();
        assert_eq!(ids(&all), vec![1, 2, 3]);
    }

    #[test]
    fn test_category_filter() {
        let service = ProductService::new(seed_products());
        let books = service.list_products(&query(Some("Books"), None, None)).unwrap();
        assert_eq!(ids(&books), vec![3]);

        let none = service.list_products(&query(Some("books"), None, None)).unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn test_price_bounds_inclusive() {
        let service = ProductService::new(seed_products());
        let result = service
            .list_products(&query(None, Some("99.99"), Some("149.99")))
            .unwrap();
        assert_eq!(ids(&result), vec![1, 2]);

        let result = service.list_products(&query(None, Some("1000"), None)).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_filters_combine() {
        let service = ProductService::new(seed_products());
        let result = service
            .list_products(&query(Some("Electronics"), Some("50"), Some("100")))
            .unwrap();
        assert_eq!(ids(&result), vec![1]);
    }

    #[test]
    fn test_non_numeric_bound_excludes_everything() {
        let service = ProductService::new(seed_products());
        let result = service.list_products(&query(None, Some("cheap"), None)).unwrap();
        assert!(result.is_empty());

        let result = service.list_products(&query(None, None, Some("abc"))).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_empty_params_ignored() {
        let service = ProductService::new(seed_products());
        let result = service
            .list_products(&query(Some(""), Some(""), Some("")))
            .unwrap();
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn test_repeated_params() {
        let service = ProductService::new(seed_products());

        let repeated = ProductQuery {
            min_price: vec!["80".to_string(), "90".to_string()],
            ..Default::default()
        };
        assert_eq!(ids(&service.list_products(&repeated).unwrap()), vec![1, 2]);

        let repeated = ProductQuery {
            category: vec!["Books".to_string(), "Books".to_string()],
            ..Default::default()
        };
        assert!(service.list_products(&repeated).unwrap().is_empty());
    }

    #[test]
    fn test_concurrent_creates_get_unique_ids() {
        let service = ProductService::new(seed_products());
        let handles: Vec<_> = (0..16)
            .map(|_| {
                let service = service.clone();
                std::thread::spawn(move || {
                    service
                        .create_product(CreateProductInput::default())
                        .unwrap()
                        .id
                })
            })
            .collect();

        let mut ids: Vec<i64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        ids.sort_unstable();
        assert_eq!(ids, (4..=19).collect::<Vec<_>>());
        assert_eq!(service.count().unwrap(), 19);
    }

    #[test]
    fn test_create_and_get_product() {
        let service = ProductService::new(seed_products());
        let created = service
            .create_product(CreateProductInput {
                name: Some("Widget".to_string()),
                price: Some(12.5),
                category: Some("Tools".to_string()),
            })
            .unwrap();

        assert_eq!(created.id, 4);
        assert_eq!(service.get_product(Some(4)).unwrap(), created);
        assert!(matches!(
            service.get_product(Some(5)),
            Err(CoreError::NotFound(msg)) if msg == "Product not found"
        ));
    }
}
