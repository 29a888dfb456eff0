use std::sync::Arc;

use crate::config::DatabaseConfig;
use crate::errors::Result;

pub mod backend;
pub mod models;

pub use backend::SeaOrmStorage;
pub use models::{
    DimensionKind, DimensionSnapshot, DimensionValue, NewUrlRecord, SeedReport, UrlRecord,
};

pub struct StorageFactory;

impl StorageFactory {
    /// Connect to the configured database and run pending migrations
    pub async fn create(config: &DatabaseConfig) -> Result<Arc<SeaOrmStorage>> {
        let storage = SeaOrmStorage::new(config).await?;
        Ok(Arc::new(storage))
    }
}
