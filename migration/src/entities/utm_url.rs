//! Generated URL log entity (append-only)

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "utm_urls")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "Text")]
    pub base_url: String,
    pub source_id: i32,
    pub medium_id: Option<i32>,
    pub campaign_id: Option<i32>,
    #[sea_orm(column_type = "Text", nullable)]
    pub content: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub generated_url: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::utm_source::Entity",
        from = "Column::SourceId",
        to = "super::utm_source::Column::Id"
    )]
    UtmSource,
    #[sea_orm(
        belongs_to = "super::utm_medium::Entity",
        from = "Column::MediumId",
        to = "super::utm_medium::Column::Id"
    )]
    UtmMedium,
    #[sea_orm(
        belongs_to = "super::campaign::Entity",
        from = "Column::CampaignId",
        to = "super::campaign::Column::Id"
    )]
    Campaign,
}

impl Related<super::utm_source::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UtmSource.def()
    }
}

impl Related<super::utm_medium::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UtmMedium.def()
    }
}

impl Related<super::campaign::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Campaign.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
