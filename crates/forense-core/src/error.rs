//! 错误定义模块

use thiserror::Error;

/// 法医分析系统统一错误类型
#[derive(Error, Debug)]
pub enum ForenseError {
    #[error("配置错误: {0}")]
    Config(String),

    #[error("数据库错误: {0}")]
    Database(String),

    #[error("渲染错误: {0}")]
    Render(String),

    #[error("交互错误: {0}")]
    Interaction(String),

    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("序列化错误: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// 法医分析系统统一结果类型
pub type Result<T> = std::result::Result<T, ForenseError>;
