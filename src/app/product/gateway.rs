//! 商品存储网关

use async_trait::async_trait;
use thiserror::Error;

use super::model::{Product, ProductFilter};

/// 存储层错误，由上层原样传递，不做解释
#[derive(Debug, Error)]
pub enum GatewayError {
    #[cfg(feature = "database")]
    #[error("数据库错误: {0}")]
    Database(#[from] sqlx::Error),
    #[error("存储不可用: {0}")]
    Unavailable(String),
}

/// 商品存储网关：每次调用只执行一次插入或一次查询
#[async_trait]
pub trait ProductGateway: Send + Sync {
    /// 插入一条商品记录并分配 `id`，返回影响的行数
    async fn insert(&self, product: &Product) -> Result<u64, GatewayError>;

    /// 按条件查询商品，无匹配时返回空列表
    async fn query(&self, filter: &ProductFilter) -> Result<Vec<Product>, GatewayError>;

    /// 后端名称，用于日志和健康检查
    fn backend(&self) -> &'static str;
}
