pub use sea_orm_migration::prelude::*;

pub mod entities;
mod m20261019_000001_dimension_tables;
mod m20261019_000002_utm_urls;
mod m20261019_000003_single_default_campaign;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261019_000001_dimension_tables::Migration),
            Box::new(m20261019_000002_utm_urls::Migration),
            Box::new(m20261019_000003_single_default_campaign::Migration),
        ]
    }
}
