//! Mutation operations for SeaOrmStorage
//!
//! Writes are not retried: a duplicate insert after a lost ack would
//! turn into a spurious `DuplicateName`.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseTransaction, EntityTrait,
    QueryFilter, SqlErr, TransactionTrait, sea_query::Expr,
};
use tracing::info;

use super::converters::{
    campaign_to_value, medium_to_value, model_to_url_record, new_record_to_active_model,
    source_to_value,
};
use super::query::{count_references, load_by_name};
use super::{SeaOrmStorage, constraint_violation, map_db_err};
use crate::errors::{Result, UtmError};
use crate::storage::models::{DimensionKind, DimensionValue, NewUrlRecord, UrlRecord};

use migration::entities::{campaign, utm_medium, utm_source};

fn duplicate(kind: DimensionKind, name: &str) -> UtmError {
    UtmError::duplicate_name(format!("{} '{}' already exists", kind.label(), name))
}

fn not_found(kind: DimensionKind, name: &str) -> UtmError {
    UtmError::not_found(format!("{} '{}' does not exist", kind.label(), name))
}

fn in_use(kind: DimensionKind, name: &str) -> UtmError {
    UtmError::in_use(format!(
        "{} '{}' is referenced by generated URLs and cannot be removed",
        kind.label(),
        name
    ))
}

fn cannot_remove_default(name: &str) -> UtmError {
    UtmError::cannot_remove_default(format!(
        "Campaign '{}' is the default campaign and cannot be removed",
        name
    ))
}

async fn begin(storage: &SeaOrmStorage) -> Result<DatabaseTransaction> {
    storage
        .db
        .begin()
        .await
        .map_err(|e| map_db_err("Failed to begin transaction", e))
}

async fn commit(txn: DatabaseTransaction) -> Result<()> {
    txn.commit()
        .await
        .map_err(|e| map_db_err("Failed to commit transaction", e))
}

/// 插入一行维度取值；唯一约束冲突映射为 DuplicateName
async fn insert_value<C: ConnectionTrait>(
    db: &C,
    kind: DimensionKind,
    name: &str,
    is_default: bool,
) -> Result<DimensionValue> {
    use sea_orm::ActiveValue::*;

    let now = Utc::now();
    let inserted = match kind {
        DimensionKind::Source => utm_source::ActiveModel {
            id: NotSet,
            name: Set(name.to_string()),
            created_at: Set(now),
        }
        .insert(db)
        .await
        .map(source_to_value),
        DimensionKind::Medium => utm_medium::ActiveModel {
            id: NotSet,
            name: Set(name.to_string()),
            created_at: Set(now),
        }
        .insert(db)
        .await
        .map(medium_to_value),
        DimensionKind::Campaign => campaign::ActiveModel {
            id: NotSet,
            name: Set(name.to_string()),
            is_default: Set(is_default),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(db)
        .await
        .map(campaign_to_value),
    };

    inserted.map_err(|e| match constraint_violation(&e) {
        Some(SqlErr::UniqueConstraintViolation(_)) => duplicate(kind, name),
        _ => map_db_err(&format!("Failed to insert {} '{}'", kind, name), e),
    })
}

impl SeaOrmStorage {
    /// New campaigns are never default
    pub async fn insert_dimension(&self, kind: DimensionKind, name: &str) -> Result<DimensionValue> {
        if self.find_dimension(kind, name).await?.is_some() {
            return Err(duplicate(kind, name));
        }

        let value = insert_value(&self.db, kind, name, false).await?;
        info!("{} added: {} (id {})", kind.label(), value.name, value.id);
        Ok(value)
    }

    /// Insert the default campaign, used by seeding an empty store
    pub(super) async fn insert_default_campaign(&self, name: &str) -> Result<DimensionValue> {
        let value = insert_value(&self.db, DimensionKind::Campaign, name, true).await?;
        info!("Default campaign added: {} (id {})", value.name, value.id);
        Ok(value)
    }

    /// Remove a value by name
    ///
    /// For campaigns the default check is part of the DELETE itself
    /// (`WHERE name = ? AND is_default = false`); when it deletes nothing the
    /// row is re-read inside the same transaction to tell "default" from "gone".
    pub async fn delete_dimension(&self, kind: DimensionKind, name: &str) -> Result<DimensionValue> {
        let txn = begin(self).await?;

        let existing = load_by_name(&txn, kind, name)
            .await
            .map_err(|e| map_db_err(&format!("Failed to look up {} '{}'", kind, name), e))?
            .ok_or_else(|| not_found(kind, name))?;

        // 默认 campaign 交给条件删除判定
        if !existing.is_default {
            let references = count_references(&txn, kind, existing.id)
                .await
                .map_err(|e| map_db_err("Failed to count references", e))?;
            if references > 0 {
                return Err(in_use(kind, name));
            }
        }

        let deleted = match kind {
            DimensionKind::Source => utm_source::Entity::delete_many()
                .filter(utm_source::Column::Name.eq(name))
                .exec(&txn)
                .await,
            DimensionKind::Medium => utm_medium::Entity::delete_many()
                .filter(utm_medium::Column::Name.eq(name))
                .exec(&txn)
                .await,
            DimensionKind::Campaign => campaign::Entity::delete_many()
                .filter(campaign::Column::Name.eq(name))
                .filter(campaign::Column::IsDefault.eq(false))
                .exec(&txn)
                .await,
        }
        .map_err(|e| match constraint_violation(&e) {
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => in_use(kind, name),
            _ => map_db_err(&format!("Failed to remove {} '{}'", kind, name), e),
        })?;

        if deleted.rows_affected == 0 {
            let current = load_by_name(&txn, kind, name)
                .await
                .map_err(|e| map_db_err(&format!("Failed to look up {} '{}'", kind, name), e))?;
            return Err(match current {
                Some(value) if value.is_default => cannot_remove_default(name),
                _ => not_found(kind, name),
            });
        }

        commit(txn).await?;
        info!("{} removed: {}", kind.label(), name);
        Ok(existing)
    }

    /// Make `name` the only default campaign
    pub async fn set_default_campaign(&self, name: &str) -> Result<DimensionValue> {
        let txn = begin(self).await?;

        let target = campaign::Entity::find()
            .filter(campaign::Column::Name.eq(name))
            .one(&txn)
            .await
            .map_err(|e| map_db_err(&format!("Failed to look up campaign '{}'", name), e))?
            .ok_or_else(|| not_found(DimensionKind::Campaign, name))?;

        if target.is_default {
            return Ok(campaign_to_value(target));
        }

        let now = Utc::now();

        // 先清除旧默认值，部分唯一索引不允许同时存在两个
        campaign::Entity::update_many()
            .col_expr(campaign::Column::IsDefault, Expr::value(false))
            .col_expr(campaign::Column::UpdatedAt, Expr::value(now))
            .filter(campaign::Column::IsDefault.eq(true))
            .exec(&txn)
            .await
            .map_err(|e| map_db_err("Failed to clear default campaign", e))?;

        campaign::Entity::update_many()
            .col_expr(campaign::Column::IsDefault, Expr::value(true))
            .col_expr(campaign::Column::UpdatedAt, Expr::value(now))
            .filter(campaign::Column::Id.eq(target.id))
            .exec(&txn)
            .await
            .map_err(|e| map_db_err(&format!("Failed to mark '{}' as default", name), e))?;

        commit(txn).await?;
        info!("Default campaign set to: {}", name);

        Ok(campaign_to_value(campaign::Model {
            is_default: true,
            updated_at: now,
            ..target
        }))
    }

    /// Append a generated URL to the log
    pub async fn insert_url_record(&self, record: &NewUrlRecord) -> Result<UrlRecord> {
        let model = new_record_to_active_model(record)
            .insert(&self.db)
            .await
            .map_err(|e| match constraint_violation(&e) {
                Some(SqlErr::ForeignKeyConstraintViolation(_)) => UtmError::unknown_source(format!(
                    "A referenced dimension value no longer exists (source id {})",
                    record.source_id
                )),
                _ => map_db_err("Failed to save generated URL", e),
            })?;

        let saved = model_to_url_record(model);
        info!("URL record saved: id {} -> {}", saved.id, saved.generated_url);
        Ok(saved)
    }
}
