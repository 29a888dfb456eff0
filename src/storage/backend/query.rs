//! Query operations for SeaOrmStorage
//!
//! Read-only operations; transient failures are retried.

use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use tracing::debug;

use super::converters::{campaign_to_value, medium_to_value, model_to_url_record, source_to_value};
use super::{SeaOrmStorage, map_db_err, retry};
use crate::errors::Result;
use crate::storage::models::{DimensionKind, DimensionSnapshot, DimensionValue, UrlRecord};

use migration::entities::{campaign, utm_medium, utm_source, utm_url};

/// 按插入顺序读取某个维度的全部取值
pub(super) async fn load_dimension<C: ConnectionTrait>(
    db: &C,
    kind: DimensionKind,
) -> std::result::Result<Vec<DimensionValue>, sea_orm::DbErr> {
    let values = match kind {
        DimensionKind::Source => utm_source::Entity::find()
            .order_by_asc(utm_source::Column::Id)
            .all(db)
            .await?
            .into_iter()
            .map(source_to_value)
            .collect(),
        DimensionKind::Medium => utm_medium::Entity::find()
            .order_by_asc(utm_medium::Column::Id)
            .all(db)
            .await?
            .into_iter()
            .map(medium_to_value)
            .collect(),
        DimensionKind::Campaign => campaign::Entity::find()
            .order_by_asc(campaign::Column::Id)
            .all(db)
            .await?
            .into_iter()
            .map(campaign_to_value)
            .collect(),
    };
    Ok(values)
}

/// 按名称精确查找（区分大小写）
pub(super) async fn load_by_name<C: ConnectionTrait>(
    db: &C,
    kind: DimensionKind,
    name: &str,
) -> std::result::Result<Option<DimensionValue>, sea_orm::DbErr> {
    let value = match kind {
        DimensionKind::Source => utm_source::Entity::find()
            .filter(utm_source::Column::Name.eq(name))
            .one(db)
            .await?
            .map(source_to_value),
        DimensionKind::Medium => utm_medium::Entity::find()
            .filter(utm_medium::Column::Name.eq(name))
            .one(db)
            .await?
            .map(medium_to_value),
        DimensionKind::Campaign => campaign::Entity::find()
            .filter(campaign::Column::Name.eq(name))
            .one(db)
            .await?
            .map(campaign_to_value),
    };
    Ok(value)
}

/// URL 记录中引用该取值的行数
pub(super) async fn count_references<C: ConnectionTrait>(
    db: &C,
    kind: DimensionKind,
    id: i32,
) -> std::result::Result<u64, sea_orm::DbErr> {
    let column = match kind {
        DimensionKind::Source => utm_url::Column::SourceId,
        DimensionKind::Medium => utm_url::Column::MediumId,
        DimensionKind::Campaign => utm_url::Column::CampaignId,
    };
    utm_url::Entity::find().filter(column.eq(id)).count(db).await
}

impl SeaOrmStorage {
    pub async fn list_dimension(&self, kind: DimensionKind) -> Result<Vec<DimensionValue>> {
        let db = &self.db;

        let values = retry::with_retry(
            &format!("list_dimension({})", kind),
            self.retry_config,
            || async move { load_dimension(db, kind).await },
        )
        .await
        .map_err(|e| map_db_err(&format!("Failed to list {} values", kind), e))?;

        debug!("Loaded {} {} values", values.len(), kind);
        Ok(values)
    }

    pub async fn find_dimension(
        &self,
        kind: DimensionKind,
        name: &str,
    ) -> Result<Option<DimensionValue>> {
        let db = &self.db;

        retry::with_retry(
            &format!("find_dimension({}, {})", kind, name),
            self.retry_config,
            || async move { load_by_name(db, kind, name).await },
        )
        .await
        .map_err(|e| map_db_err(&format!("Failed to look up {} '{}'", kind, name), e))
    }

    /// Three independent reads, issued concurrently; fails if any one fails
    pub async fn list_all(&self) -> Result<DimensionSnapshot> {
        let (sources, mediums, campaigns) = tokio::try_join!(
            self.list_dimension(DimensionKind::Source),
            self.list_dimension(DimensionKind::Medium),
            self.list_dimension(DimensionKind::Campaign),
        )?;

        Ok(DimensionSnapshot {
            sources,
            mediums,
            campaigns,
        })
    }

    /// Most recent records first
    pub async fn list_url_records(&self, limit: u64) -> Result<Vec<UrlRecord>> {
        let db = &self.db;

        let models = retry::with_retry("list_url_records", self.retry_config, || async move {
            utm_url::Entity::find()
                .order_by_desc(utm_url::Column::CreatedAt)
                .order_by_desc(utm_url::Column::Id)
                .limit(limit)
                .all(db)
                .await
        })
        .await
        .map_err(|e| map_db_err("Failed to list URL records", e))?;

        Ok(models.into_iter().map(model_to_url_record).collect())
    }

    pub async fn count_url_records(&self) -> Result<u64> {
        let db = &self.db;

        retry::with_retry("count_url_records", self.retry_config, || async move {
            utm_url::Entity::find().count(db).await
        })
        .await
        .map_err(|e| map_db_err("Failed to count URL records", e))
    }
}
