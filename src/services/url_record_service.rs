//! Generated URL persistence

use std::sync::Arc;

use tracing::debug;

use crate::errors::{Result, UtmError};
use crate::storage::{DimensionKind, DimensionSnapshot, NewUrlRecord, SeaOrmStorage, UrlRecord};

/// Default page size for record history
pub const DEFAULT_HISTORY_LIMIT: u64 = 20;
/// Upper bound for a single history request
pub const MAX_HISTORY_LIMIT: u64 = 500;

/// Names of the values a URL was generated with, before id resolution
#[derive(Debug, Clone, Copy)]
pub struct RecordSelection<'a> {
    pub base_url: &'a str,
    pub source: &'a str,
    pub medium: Option<&'a str>,
    pub campaign: Option<&'a str>,
    pub content: Option<&'a str>,
    pub generated_url: &'a str,
}

/// Resolve names to ids against `snapshot`
///
/// An unknown source is an error; unknown medium or campaign names are stored as NULL.
pub fn resolve_record(snapshot: &DimensionSnapshot, sel: RecordSelection<'_>) -> Result<NewUrlRecord> {
    let source_id = snapshot
        .find(DimensionKind::Source, sel.source)
        .map(|s| s.id)
        .ok_or_else(|| {
            UtmError::unknown_source(format!("Source '{}' is not a known source", sel.source))
        })?;

    let lookup = |kind: DimensionKind, name: Option<&str>| -> Option<i32> {
        name.filter(|n| !n.is_empty())
            .and_then(|n| snapshot.find(kind, n))
            .map(|v| v.id)
    };

    Ok(NewUrlRecord {
        base_url: sel.base_url.to_string(),
        source_id,
        medium_id: lookup(DimensionKind::Medium, sel.medium),
        campaign_id: lookup(DimensionKind::Campaign, sel.campaign),
        content: sel.content.filter(|c| !c.is_empty()).map(str::to_string),
        generated_url: sel.generated_url.to_string(),
    })
}

pub struct UrlRecordService {
    storage: Arc<SeaOrmStorage>,
}

impl UrlRecordService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    pub async fn record_generated_url(&self, record: NewUrlRecord) -> Result<UrlRecord> {
        self.storage.insert_url_record(&record).await
    }

    /// Most recent records first; `limit` is clamped to `1..=MAX_HISTORY_LIMIT`
    pub async fn history(&self, limit: u64) -> Result<Vec<UrlRecord>> {
        let limit = limit.clamp(1, MAX_HISTORY_LIMIT);
        let records = self.storage.list_url_records(limit).await?;
        debug!("Loaded {} URL records", records.len());
        Ok(records)
    }

    pub async fn count(&self) -> Result<u64> {
        self.storage.count_url_records().await
    }
}
