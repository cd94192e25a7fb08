//! # Forense Core
//!
//! 法医血样分析系统的核心模块，提供基础数据结构、错误定义、查询目录接口和标签映射。

pub mod catalog;
pub mod error;
pub mod labels;
pub mod models;

pub use catalog::QueryCatalog;
pub use error::{ForenseError, Result};
pub use labels::LabelMap;
pub use models::*;
