//! 基于 PostgreSQL 的商品存储

use async_trait::async_trait;
use sqlx::postgres::PgPool;
use tracing::debug;

use crate::app::product::gateway::{GatewayError, ProductGateway};
use crate::app::product::model::{Product, ProductFilter};

#[derive(Clone)]
pub struct PgProductGateway {
    pool: PgPool,
}

impl PgProductGateway {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// 根据查询条件拼接 SELECT 语句，占位符顺序与 `query` 中的绑定顺序一致
fn build_select(filter: &ProductFilter) -> String {
    const SELECT: &str = "SELECT id, name, image, price, seller FROM sys_product";
    if filter.is_empty() {
        return format!("{} ORDER BY id ASC", SELECT);
    }

    let mut sql = format!("{} WHERE 1=1", SELECT);
    let mut param_count = 0;

    if filter.id.is_some() {
        param_count += 1;
        sql.push_str(&format!(" AND id = ${}", param_count));
    }
    if filter.name.is_some() {
        param_count += 1;
        sql.push_str(&format!(" AND name = ${}", param_count));
    }
    if filter.image.is_some() {
        param_count += 1;
        sql.push_str(&format!(" AND ${} = ANY(image)", param_count));
    }
    if filter.price.is_some() {
        param_count += 1;
        sql.push_str(&format!(" AND price = ${}", param_count));
    }
    if filter.seller.is_some() {
        param_count += 1;
        sql.push_str(&format!(" AND seller = ${}", param_count));
    }

    sql.push_str(" ORDER BY id ASC");
    sql
}

#[async_trait]
impl ProductGateway for PgProductGateway {
    async fn insert(&self, product: &Product) -> Result<u64, GatewayError> {
        let result = sqlx::query(
            "INSERT INTO sys_product (name, image, price, seller) VALUES ($1, $2, $3, $4)",
        )
        .bind(&product.name)
        .bind(&product.image)
        .bind(product.price)
        .bind(&product.seller)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn query(&self, filter: &ProductFilter) -> Result<Vec<Product>, GatewayError> {
        let sql = build_select(filter);
        debug!(sql = %sql, "查询商品列表");

        let mut query = sqlx::query_as::<_, Product>(&sql);
        if let Some(id) = filter.id {
            query = query.bind(id);
        }
        if let Some(ref name) = filter.name {
            query = query.bind(name);
        }
        if let Some(ref image) = filter.image {
            query = query.bind(image);
        }
        if let Some(price) = filter.price {
            query = query.bind(price);
        }
        if let Some(ref seller) = filter.seller {
            query = query.bind(seller);
        }

        let products = query.fetch_all(&self.pool).await?;
        Ok(products)
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filter_selects_everything() {
        let sql = build_select(&ProductFilter::default());
        assert_eq!(
            sql,
            "SELECT id, name, image, price, seller FROM sys_product ORDER BY id ASC"
        );
    }

    #[test]
    fn test_placeholders_follow_field_order() {
        let filter = ProductFilter {
            name: Some("耳机".to_string()),
            image: Some("a.jpg".to_string()),
            seller: Some("shop-a".to_string()),
            ..Default::default()
        };
        let sql = build_select(&filter);
        assert!(sql.contains("AND name = $1"));
        assert!(sql.contains("AND $2 = ANY(image)"));
        assert!(sql.contains("AND seller = $3"));
        assert!(!sql.contains("$4"));
    }
}
