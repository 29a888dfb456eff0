//! SeaORM storage backend
//!
//! Dimension tables and the generated URL log, on SQLite,
//! MySQL/MariaDB or PostgreSQL.

mod connection;
mod converters;
mod mutations;
mod query;
mod retry;
mod seed;

use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, SqlErr};
use tracing::info;

use crate::config::DatabaseConfig;
use crate::errors::{Result, UtmError};

pub use connection::{connect_generic, connect_sqlite, run_migrations};
pub use converters::{
    campaign_to_value, medium_to_value, model_to_url_record, new_record_to_active_model,
    source_to_value,
};

/// 从数据库 URL 推断数据库类型
pub fn infer_backend_from_url(database_url: &str) -> Result<String> {
    if database_url.starts_with("sqlite:")
        || database_url.ends_with(".db")
        || database_url.ends_with(".sqlite")
    {
        Ok("sqlite".to_string())
    } else if database_url.starts_with("mysql://") || database_url.starts_with("mariadb://") {
        Ok("mysql".to_string())
    } else if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        Ok("postgres".to_string())
    } else {
        Err(UtmError::database_config(format!(
            "Cannot infer database type from URL: {}. Supported: sqlite://, mysql://, mariadb://, postgres://",
            database_url
        )))
    }
}

/// Unique and foreign key violations, as classified by the driver
pub(crate) fn constraint_violation(err: &DbErr) -> Option<SqlErr> {
    if let Some(sql_err) = err.sql_err() {
        return Some(sql_err);
    }
    // 部分驱动只给出消息文本
    let msg = err.to_string().to_lowercase();
    if msg.contains("unique constraint") || msg.contains("duplicate entry") {
        Some(SqlErr::UniqueConstraintViolation(msg))
    } else if msg.contains("foreign key constraint") {
        Some(SqlErr::ForeignKeyConstraintViolation(msg))
    } else {
        None
    }
}

/// 将 DbErr 映射为业务错误（不处理约束冲突）
pub(crate) fn map_db_err(context: &str, err: DbErr) -> UtmError {
    match err {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => {
            UtmError::database_connection(format!("{}: {}", context, err))
        }
        _ => UtmError::database_operation(format!("{}: {}", context, err)),
    }
}

/// SeaORM-based storage backend
#[derive(Clone)]
pub struct SeaOrmStorage {
    db: DatabaseConnection,
    backend_name: String,
    retry_config: retry::RetryConfig,
}

impl SeaOrmStorage {
    /// Connect, then bring the schema up to date
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        let database_url = config.database_url.trim();
        if database_url.is_empty() {
            return Err(UtmError::database_config("database_url is not set"));
        }

        let backend_name = infer_backend_from_url(database_url)?;
        let db = if backend_name == "sqlite" {
            connect_sqlite(database_url).await?
        } else {
            connect_generic(database_url, &backend_name, config.pool_size).await?
        };

        let storage = SeaOrmStorage {
            db,
            backend_name,
            retry_config: retry::RetryConfig::from(config),
        };

        run_migrations(&storage.db).await?;

        info!("{} storage initialized", storage.backend_name.to_uppercase());
        Ok(storage)
    }

    pub fn backend_name(&self) -> &str {
        &self.backend_name
    }

    /// 获取数据库连接
    pub fn get_db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Liveness check used by the health endpoint
    pub async fn ping(&self) -> Result<()> {
        self.db
            .execute_unprepared("SELECT 1")
            .await
            .map_err(|e| map_db_err("Database ping failed", e))?;
        Ok(())
    }
}
