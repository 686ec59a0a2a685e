//! 商品处理器

use axum::{
    body::Bytes,
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    response::Json,
};
use serde_json::json;
use tracing::info;

use super::{
    import::{import_products, parse_csv, strip_bom},
    model::{Product, ProductFilter},
    service::ProductService,
};
use crate::core::{error::CoreError, response::ApiResponse};

pub const SAVE_FAILED: &str = "保存失败";
pub const NO_DATA: &str = "没有接收到数据";
pub const CSV_EMPTY: &str = "CSV数据为空";

#[derive(Clone)]
pub struct AppState {
    pub product_service: ProductService,
}

/// 新增商品
pub async fn add(
    State(state): State<AppState>,
    payload: Result<Json<Product>, JsonRejection>,
) -> Result<Json<ApiResponse<()>>, CoreError> {
    let Json(product) = payload?;
    let rows = state.product_service.insert_product(&product).await?;
    if rows > 0 {
        Ok(Json(ApiResponse::ok()))
    } else {
        Ok(Json(ApiResponse::error(SAVE_FAILED)))
    }
}

/// 查询商品列表
pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<ProductFilter>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<Product>>>, CoreError> {
    let Query(filter) = query?;
    let filter = filter.normalized();
    let products = state.product_service.select_product_list(&filter).await?;
    Ok(Json(ApiResponse::success(products)))
}

/// 接收 JSON 商品数组并逐条保存
///
/// 请求体缺失、为 `null` 或空数组时直接返回失败，不访问存储。
pub async fn receive_json(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ApiResponse<usize>>, CoreError> {
    let products: Option<Vec<Product>> = if body.iter().all(u8::is_ascii_whitespace) {
        None
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| CoreError::BadRequest(format!("JSON 格式错误: {}", e)))?
    };

    let products = match products {
        Some(products) if !products.is_empty() => products,
        _ => return Ok(Json(ApiResponse::error(NO_DATA))),
    };

    info!(count = products.len(), "接收到商品数据");
    let saved = import_products(&state.product_service, products.into_iter().map(Ok)).await;
    Ok(Json(ApiResponse::success_with_message(
        format!("成功导入 {} 条数据", saved),
        saved,
    )))
}

/// 接收 CSV 文本并逐条保存
pub async fn receive_csv(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<ApiResponse<usize>>, CoreError> {
    if strip_bom(&body).trim().is_empty() {
        return Ok(Json(ApiResponse::error(CSV_EMPTY)));
    }

    let rows = parse_csv(&body);
    info!(count = rows.len(), "接收到 CSV 数据");
    let saved = import_products(&state.product_service, rows).await;
    Ok(Json(ApiResponse::success_with_message(
        format!("成功导入 {} 条数据", saved),
        saved,
    )))
}

/// 原样返回请求文本，用于连通性测试
pub async fn receive_string(body: String) -> Json<ApiResponse<String>> {
    info!(len = body.len(), "接收到字符串");
    Json(ApiResponse::success(body))
}

/// 健康检查
pub async fn health_check(State(state): State<AppState>) -> Json<ApiResponse<serde_json::Value>> {
    Json(ApiResponse::success(json!({
        "status": "healthy",
        "gateway": state.product_service.backend(),
    })))
}
