//! # 法医系统管理模块
//!
//! 配置加载与验证、日志初始化。

pub mod config;
pub mod logging;

pub use config::{ConfigManager, ConfigValidator, ForenseConfig, LogFormat};
pub use logging::init_logging;
