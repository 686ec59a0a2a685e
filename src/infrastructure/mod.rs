//! 基础设施层：数据库、存储实现和日志

#[cfg(feature = "database")]
pub mod database;
pub mod logger;
pub mod memory_store;
#[cfg(feature = "database")]
pub mod product_store;
