//! 商品业务服务

use std::sync::Arc;

use super::gateway::{GatewayError, ProductGateway};
use super::model::{Product, ProductFilter};

#[derive(Clone)]
pub struct ProductService {
    gateway: Arc<dyn ProductGateway>,
}

impl ProductService {
    pub fn new(gateway: Arc<dyn ProductGateway>) -> Self {
        Self { gateway }
    }

    /// 新增商品，返回影响的行数
    pub async fn insert_product(&self, product: &Product) -> Result<u64, GatewayError> {
        self.gateway.insert(product).await
    }

    /// 查询商品列表
    pub async fn select_product_list(
        &self,
        filter: &ProductFilter,
    ) -> Result<Vec<Product>, GatewayError> {
        self.gateway.query(filter).await
    }

    pub fn backend(&self) -> &'static str {
        self.gateway.backend()
    }
}
