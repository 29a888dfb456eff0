//! Dimension management service
//!
//! Mediates add/remove of sources, mediums and campaigns and keeps an
//! in-memory snapshot of all three dimensions in step with the store.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use arc_swap::ArcSwap;
use tracing::{debug, info, warn};

use crate::errors::{Result, UtmError};
use crate::storage::{DimensionKind, DimensionSnapshot, DimensionValue, SeaOrmStorage};

/// Trim a submitted name; empty names are rejected
pub fn normalize_name(kind: DimensionKind, name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(UtmError::validation(format!(
            "{} name is required",
            kind.label()
        )));
    }
    Ok(trimmed.to_string())
}

pub struct DimensionService {
    storage: Arc<SeaOrmStorage>,
    snapshot: ArcSwap<DimensionSnapshot>,
    /// Set when a post-mutation refresh failed; the next read reloads
    stale: AtomicBool,
}

impl DimensionService {
    /// Create the service and load the initial snapshot
    pub async fn new(storage: Arc<SeaOrmStorage>) -> Result<Self> {
        let initial = storage.list_all().await?;
        Ok(Self {
            storage,
            snapshot: ArcSwap::from_pointee(initial),
            stale: AtomicBool::new(false),
        })
    }

    pub fn storage(&self) -> &Arc<SeaOrmStorage> {
        &self.storage
    }

    /// Last loaded snapshot, without touching the store
    pub fn cached(&self) -> Arc<DimensionSnapshot> {
        self.snapshot.load_full()
    }

    /// Current snapshot; reloads first if a previous refresh failed
    pub async fn snapshot(&self) -> Result<Arc<DimensionSnapshot>> {
        if self.stale.load(Ordering::Acquire) {
            return self.refresh().await;
        }
        Ok(self.cached())
    }

    /// Re-read all three dimensions and replace the cached snapshot
    pub async fn list_all(&self) -> Result<Arc<DimensionSnapshot>> {
        self.refresh().await
    }

    async fn refresh(&self) -> Result<Arc<DimensionSnapshot>> {
        let fresh = Arc::new(self.storage.list_all().await?);
        self.snapshot.store(Arc::clone(&fresh));
        self.stale.store(false, Ordering::Release);
        debug!(
            "Dimension snapshot refreshed: {} sources, {} mediums, {} campaigns",
            fresh.sources.len(),
            fresh.mediums.len(),
            fresh.campaigns.len()
        );
        Ok(fresh)
    }

    /// 变更成功后刷新快照；刷新失败不回滚已提交的变更
    async fn refresh_after_mutation(&self) {
        if let Err(e) = self.refresh().await {
            warn!("Failed to refresh dimension snapshot, marking stale: {}", e);
            self.stale.store(true, Ordering::Release);
        }
    }

    pub async fn add_dimension_value(
        &self,
        kind: DimensionKind,
        name: &str,
    ) -> Result<DimensionValue> {
        let name = normalize_name(kind, name)?;
        let value = self.storage.insert_dimension(kind, &name).await?;
        self.refresh_after_mutation().await;
        Ok(value)
    }

    pub async fn remove_dimension_value(
        &self,
        kind: DimensionKind,
        name: &str,
    ) -> Result<DimensionValue> {
        let name = normalize_name(kind, name)?;
        let value = self.storage.delete_dimension(kind, &name).await?;
        self.refresh_after_mutation().await;
        Ok(value)
    }

    pub async fn set_default_campaign(&self, name: &str) -> Result<DimensionValue> {
        let name = normalize_name(DimensionKind::Campaign, name)?;
        let value = self.storage.set_default_campaign(&name).await?;
        self.refresh_after_mutation().await;
        info!("Default campaign is now '{}'", value.name);
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_name_trims() {
        assert_eq!(
            normalize_name(DimensionKind::Source, "  podcast ").unwrap(),
            "podcast"
        );
    }

    #[test]
    fn test_normalize_name_rejects_blank() {
        let err = normalize_name(DimensionKind::Medium, "   ").unwrap_err();
        assert!(matches!(err, UtmError::Validation(ref m) if m.contains("Medium")));
    }
}
