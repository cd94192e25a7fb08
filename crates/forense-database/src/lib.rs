//! # 法医数据库模块
//!
//! 负责与外部法医数据库的连接，并以参数化只读查询实现查询目录。

pub mod connection;
pub mod models;
pub mod queries;

// 重新导出主要类型
pub use connection::DatabasePool;
pub use queries::DatabaseQueries;
