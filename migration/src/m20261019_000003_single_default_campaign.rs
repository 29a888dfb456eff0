//! 默认活动唯一性约束
//!
//! SQLite / PostgreSQL 使用部分唯一索引，同一时刻只能有一行 is_default = TRUE。
//! MySQL 不支持部分索引，此约束在 MySQL 上保持为建议性约束。

use sea_orm::{ConnectionTrait, DatabaseBackend};
use sea_orm_migration::prelude::*;

const INDEX_NAME: &str = "idx_campaigns_single_default";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        match manager.get_database_backend() {
            DatabaseBackend::MySql => Ok(()),
            _ => {
                manager
                    .get_connection()
                    .execute_unprepared(&format!(
                        "CREATE UNIQUE INDEX IF NOT EXISTS {INDEX_NAME} \
                         ON campaigns (is_default) WHERE is_default = TRUE"
                    ))
                    .await?;
                Ok(())
            }
        }
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        match manager.get_database_backend() {
            DatabaseBackend::MySql => Ok(()),
            _ => {
                manager
                    .get_connection()
                    .execute_unprepared(&format!("DROP INDEX IF EXISTS {INDEX_NAME}"))
                    .await?;
                Ok(())
            }
        }
    }
}
