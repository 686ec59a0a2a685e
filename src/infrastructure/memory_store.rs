//! 内存商品存储，未配置数据库时使用

use async_trait::async_trait;
use std::sync::Mutex;

use crate::app::product::gateway::{GatewayError, ProductGateway};
use crate::app::product::model::{Product, ProductFilter};

#[derive(Default)]
struct Rows {
    next_id: i64,
    products: Vec<Product>,
}

/// 按插入顺序保存商品，`id` 从 1 开始递增
#[derive(Default)]
pub struct MemoryProductGateway {
    rows: Mutex<Rows>,
}

impl MemoryProductGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.lock().map(|rows| rows.products.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned<T>(_: T) -> GatewayError {
    GatewayError::Unavailable("内存存储锁已损坏".to_string())
}

#[async_trait]
impl ProductGateway for MemoryProductGateway {
    async fn insert(&self, product: &Product) -> Result<u64, GatewayError> {
        let mut rows = self.rows.lock().map_err(poisoned)?;
        rows.next_id += 1;
        let id = rows.next_id;
        rows.products.push(Product {
            id: Some(id),
            ..product.clone()
        });
        Ok(1)
    }

    async fn query(&self, filter: &ProductFilter) -> Result<Vec<Product>, GatewayError> {
        let rows = self.rows.lock().map_err(poisoned)?;
        Ok(rows
            .products
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
