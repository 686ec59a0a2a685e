//! 商品数据模型

use serde::{de, Deserialize, Deserializer, Serialize};
use std::{fmt, str::FromStr};

/// 商品记录，对应 `sys_product` 表的一行
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "database", derive(sqlx::FromRow))]
pub struct Product {
    /// 由存储层在插入时分配，新增请求中的值会被忽略
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    /// 商品图片地址，按顺序排列
    #[serde(default)]
    pub image: Vec<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub seller: Option<String>,
}

/// 商品列表查询条件
///
/// 所有非空字段按相等匹配；缺省或空字符串的字段视为通配，数值字段同样如此（`?id=&price=`）。
/// `image` 只匹配单个图片地址：图片列表中包含该地址的商品即命中。
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProductFilter {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub price: Option<f64>,
    #[serde(default)]
    pub seller: Option<String>,
}

/// 查询参数中的空值按缺省处理，其余按 `FromStr` 解析
fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let value = Option::<String>::deserialize(deserializer)?;
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => v.parse().map(Some).map_err(de::Error::custom),
    }
}

impl ProductFilter {
    /// 去掉空字符串条件，返回只含有效约束的查询条件
    pub fn normalized(self) -> Self {
        Self {
            id: self.id,
            name: non_empty(self.name),
            image: non_empty(self.image),
            price: self.price,
            seller: non_empty(self.seller),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_none()
            && self.name.is_none()
            && self.image.is_none()
            && self.price.is_none()
            && self.seller.is_none()
    }

    /// 判断商品是否满足全部条件（调用前应先 `normalized`）
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(id) = self.id {
            if product.id != Some(id) {
                return false;
            }
        }
        if let Some(name) = &self.name {
            if product.name.as_deref() != Some(name.as_str()) {
                return false;
            }
        }
        if let Some(image) = &self.image {
            if !product.image.iter().any(|i| i == image) {
                return false;
            }
        }
        if let Some(price) = self.price {
            if product.price != Some(price) {
                return false;
            }
        }
        if let Some(seller) = &self.seller {
            if product.seller.as_deref() != Some(seller.as_str()) {
                return false;
            }
        }
        true
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Product {
        Product {
            id: Some(7),
            name: Some("蓝牙耳机".to_string()),
            image: vec!["a.jpg".to_string(), "b.jpg".to_string()],
            price: Some(19.9),
            seller: Some("shop-a".to_string()),
        }
    }

    #[test]
    fn test_empty_strings_become_wildcards() {
        let filter = ProductFilter {
            name: Some(String::new()),
            seller: Some(String::new()),
            image: Some(String::new()),
            ..Default::default()
        }
        .normalized();

        assert!(filter.is_empty());
        assert!(filter.matches(&sample()));
    }

    #[test]
    fn test_matches_single_field() {
        let product = sample();

        let by_seller = ProductFilter {
            seller: Some("shop-a".to_string()),
            ..Default::default()
        };
        assert!(by_seller.matches(&product));

        let other_seller = ProductFilter {
            seller: Some("shop-b".to_string()),
            ..Default::default()
        };
        assert!(!other_seller.matches(&product));
    }

    #[test]
    fn test_image_filter_matches_any_reference() {
        let product = sample();
        let filter = ProductFilter {
            image: Some("b.jpg".to_string()),
            ..Default::default()
        };
        assert!(filter.matches(&product));

        let missing = ProductFilter {
            image: Some("c.jpg".to_string()),
            ..Default::default()
        };
        assert!(!missing.matches(&product));
    }

    #[test]
    fn test_all_fields_must_match() {
        let filter = ProductFilter {
            name: Some("蓝牙耳机".to_string()),
            price: Some(29.9),
            ..Default::default()
        };
        assert!(!filter.matches(&sample()));
    }

    #[test]
    fn test_empty_numeric_params_become_wildcards() {
        let filter: ProductFilter = parse_query("id=&price=&name=");
        assert_eq!(filter.id, None);
        assert_eq!(filter.price, None);
        assert!(filter.normalized().is_empty());
    }

    #[test]
    fn test_numeric_params_are_parsed() {
        let filter: ProductFilter = parse_query("id=3&price=19.9");
        assert_eq!(filter.id, Some(3));
        assert_eq!(filter.price, Some(19.9));
    }

    fn parse_query(query: &str) -> ProductFilter {
        let uri: axum::http::Uri = format!("/system/product/list?{}", query).parse().unwrap();
        axum::extract::Query::<ProductFilter>::try_from_uri(&uri).unwrap().0
    }

    #[test]
    fn test_product_deserializes_with_missing_fields() {
        let product: Product = serde_json::from_str(r#"{"name":"键盘"}"#).unwrap();
        assert_eq!(product.name.as_deref(), Some("键盘"));
        assert!(product.image.is_empty());
        assert_eq!(product.id, None);
        assert_eq!(product.price, None);
    }
}
