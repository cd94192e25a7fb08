//! 数据库连接管理

use forense_core::{ForenseError, Result};
use sqlx::any::{install_default_drivers, AnyPoolOptions};
use sqlx::AnyPool;
use std::time::Duration;

/// 数据库连接
///
/// 启动时打开一次并在整个进程生命周期内共享。连接池上限为一个连接，
/// 所有查询按顺序执行。
pub struct DatabasePool {
    pool: AnyPool,
}

impl DatabasePool {
    /// 按连接字符串打开数据库，驱动由 URL 协议决定（postgres、sqlite）
    pub async fn new(url: &str, connect_timeout: Duration) -> Result<Self> {
        if url.trim().is_empty() {
            return Err(ForenseError::Config("数据库连接字符串为空".to_string()));
        }

        install_default_drivers();

        let pool = AnyPoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .acquire_timeout(connect_timeout)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect(url)
            .await
            .map_err(|e| ForenseError::Database(e.to_string()))?;

        tracing::info!(driver = driver_name(url), "Database connection established");
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &AnyPool {
        &self.pool
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// 连接字符串中的驱动部分（不含凭据）
pub fn driver_name(url: &str) -> &str {
    url.split(':').next().unwrap_or_default()
}
