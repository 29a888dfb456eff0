use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "utm_mediums")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::utm_url::Entity")]
    UtmUrl,
}

impl Related<super::utm_url::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UtmUrl.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
