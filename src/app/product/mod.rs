//! 商品管理：新增、列表查询和批量导入

pub mod gateway;
pub mod handler;
pub mod import;
pub mod model;
pub mod service;

use axum::{
    routing::{get, post},
    Router,
};

use handler::AppState;

/// 挂载在 `/system/product` 下的路由
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handler::add))
        .route("/list", get(handler::list))
        .route("/receiveJson", post(handler::receive_json))
        .route("/receiveString", post(handler::receive_string))
        .route("/receiveCsv", post(handler::receive_csv))
}
