//! # webscout
//!
//! 后台商品管理服务，提供：
//! - 商品新增与按条件查询
//! - JSON / CSV 批量导入，单条失败不影响其余记录
//! - PostgreSQL 与内存两种存储实现

pub mod app;
pub mod config;
pub mod core;
pub mod infrastructure;

pub use app::create_app;
pub use app::product::handler::AppState;
pub use app::product::service::ProductService;
