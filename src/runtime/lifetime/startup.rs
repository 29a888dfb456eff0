use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::services::{DimensionService, UrlRecordService, UtmGenerator, WebhookNotifier};
use crate::storage::{SeaOrmStorage, StorageFactory};

/// Everything the server and the CLI need, wired from one `AppConfig`
pub struct StartupContext {
    pub storage: Arc<SeaOrmStorage>,
    pub dimensions: Arc<DimensionService>,
    pub records: Arc<UrlRecordService>,
    pub generator: Arc<UtmGenerator>,
}

impl StartupContext {
    /// Build the service graph on top of an already opened storage
    pub async fn from_storage(storage: Arc<SeaOrmStorage>, config: &AppConfig) -> Result<Self> {
        let dimensions = Arc::new(
            DimensionService::new(storage.clone())
                .await
                .context("Failed to load dimension values")?,
        );
        let records = Arc::new(UrlRecordService::new(storage.clone()));
        let webhook = Arc::new(WebhookNotifier::new(&config.webhook));
        if webhook.is_enabled() {
            info!("Webhook notifications enabled");
        } else {
            debug!("Webhook URL not set, notifications disabled");
        }

        let generator = Arc::new(UtmGenerator::new(
            dimensions.clone(),
            records.clone(),
            webhook,
        ));

        Ok(Self {
            storage,
            dimensions,
            records,
            generator,
        })
    }
}

/// 连接数据库、运行迁移并组装服务
pub async fn prepare_startup(config: &AppConfig) -> Result<StartupContext> {
    let start_time = std::time::Instant::now();

    let storage = StorageFactory::create(&config.database)
        .await
        .context("Failed to create storage backend")?;
    info!("Using storage backend: {}", storage.backend_name());

    let context = StartupContext::from_storage(storage, config).await?;

    debug!("Startup finished in {:?}", start_time.elapsed());
    Ok(context)
}
