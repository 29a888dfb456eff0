//! Idempotent seeding of the dimension tables

use tracing::{info, warn};

use super::SeaOrmStorage;
use crate::config::SeedConfig;
use crate::errors::{Result, UtmError};
use crate::storage::models::{DimensionKind, SeedReport};

impl SeaOrmStorage {
    /// Insert the configured values, skipping any that already exist
    ///
    /// The seed campaign is only marked default when no campaign is default yet.
    pub async fn seed(&self, config: &SeedConfig) -> Result<SeedReport> {
        let mut report = SeedReport::default();

        for name in &config.sources {
            if self.seed_value(DimensionKind::Source, name).await? {
                report.sources_added += 1;
            }
        }
        for name in &config.mediums {
            if self.seed_value(DimensionKind::Medium, name).await? {
                report.mediums_added += 1;
            }
        }

        let campaign = config.default_campaign.trim();
        if !campaign.is_empty()
            && self
                .find_dimension(DimensionKind::Campaign, campaign)
                .await?
                .is_none()
        {
            let has_default = self
                .list_dimension(DimensionKind::Campaign)
                .await?
                .iter()
                .any(|c| c.is_default);

            let inserted = if has_default {
                warn!(
                    "A default campaign already exists, seeding '{}' as a regular campaign",
                    campaign
                );
                self.insert_dimension(DimensionKind::Campaign, campaign).await
            } else {
                self.insert_default_campaign(campaign).await
            };

            match inserted {
                Ok(_) => report.campaign_added = true,
                Err(UtmError::DuplicateName(_)) => {}
                Err(e) => return Err(e),
            }
        }

        info!(
            "Seed finished: {} sources, {} mediums added, campaign added: {}",
            report.sources_added, report.mediums_added, report.campaign_added
        );
        Ok(report)
    }

    async fn seed_value(&self, kind: DimensionKind, name: &str) -> Result<bool> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(false);
        }

        match self.insert_dimension(kind, name).await {
            Ok(_) => Ok(true),
            Err(UtmError::DuplicateName(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
