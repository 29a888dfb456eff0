//! 生成记录表：utm_urls
//!
//! 被引用的维度值不可删除（ON DELETE RESTRICT）

use sea_orm_migration::prelude::*;

use crate::m20261019_000001_dimension_tables::{Campaigns, UtmMediums, UtmSources};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UtmUrls::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UtmUrls::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(UtmUrls::BaseUrl).text().not_null())
                    .col(ColumnDef::new(UtmUrls::SourceId).integer().not_null())
                    .col(ColumnDef::new(UtmUrls::MediumId).integer().null())
                    .col(ColumnDef::new(UtmUrls::CampaignId).integer().null())
                    .col(ColumnDef::new(UtmUrls::Content).text().null())
                    .col(ColumnDef::new(UtmUrls::GeneratedUrl).text().not_null())
                    .col(
                        ColumnDef::new(UtmUrls::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(UtmUrls::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_utm_urls_source_id")
                            .from(UtmUrls::Table, UtmUrls::SourceId)
                            .to(UtmSources::Table, UtmSources::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_utm_urls_medium_id")
                            .from(UtmUrls::Table, UtmUrls::MediumId)
                            .to(UtmMediums::Table, UtmMediums::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_utm_urls_campaign_id")
                            .from(UtmUrls::Table, UtmUrls::CampaignId)
                            .to(Campaigns::Table, Campaigns::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // 历史列表按创建时间倒序
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_utm_urls_created_at")
                    .table(UtmUrls::Table)
                    .col(UtmUrls::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_utm_urls_created_at")
                    .table(UtmUrls::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(UtmUrls::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum UtmUrls {
    #[sea_orm(iden = "utm_urls")]
    Table,
    Id,
    BaseUrl,
    SourceId,
    MediumId,
    CampaignId,
    Content,
    GeneratedUrl,
    CreatedAt,
    UpdatedAt,
}
