//! Generate flow: compose, persist, notify
//!
//! Validation failures stop before the store is touched. A persistence
//! failure still returns the composed URL, with a warning attached.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::dimension_service::DimensionService;
use super::url_record_service::{RecordSelection, UrlRecordService, resolve_record};
use super::webhook::{WebhookNotifier, WebhookPayload};
use crate::errors::Result;
use crate::storage::UrlRecord;
use crate::utm::{compose, format_title};

/// A request to generate one UTM URL
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub url: String,
    pub source: String,
    #[serde(default)]
    pub medium: Option<String>,
    #[serde(default)]
    pub campaign: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

/// Result of a successful composition
#[derive(Debug, Serialize)]
pub struct GenerateOutcome {
    pub generated_url: String,
    /// The saved record; `None` when persistence failed
    pub record: Option<UrlRecord>,
    /// User-facing message when the URL was generated but not saved
    pub warning: Option<String>,
    /// Pending webhook delivery. Long-lived runtimes can drop it; a
    /// short-lived one must await it before shutting down.
    #[serde(skip)]
    pub notification: Option<JoinHandle<()>>,
}

impl GenerateOutcome {
    pub fn saved(&self) -> bool {
        self.record.is_some()
    }

    /// Wait for the webhook task, at most `limit`
    ///
    /// Returns `true` when there was nothing to wait for or the task
    /// finished in time. Delivery errors are already logged by the task.
    pub async fn wait_for_notification(&mut self, limit: Duration) -> bool {
        let Some(handle) = self.notification.take() else {
            return true;
        };

        match tokio::time::timeout(limit, handle).await {
            Ok(Ok(())) => true,
            Ok(Err(e)) => {
                warn!("Webhook task aborted: {}", e);
                true
            }
            Err(_) => {
                warn!("Webhook still pending after {:?}, giving up on it", limit);
                false
            }
        }
    }
}

fn trimmed(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

pub struct UtmGenerator {
    dimensions: Arc<DimensionService>,
    records: Arc<UrlRecordService>,
    webhook: Arc<WebhookNotifier>,
}

impl UtmGenerator {
    pub fn new(
        dimensions: Arc<DimensionService>,
        records: Arc<UrlRecordService>,
        webhook: Arc<WebhookNotifier>,
    ) -> Self {
        Self {
            dimensions,
            records,
            webhook,
        }
    }

    /// Upper bound for one webhook delivery, including spawn overhead
    pub fn notification_deadline(&self) -> Duration {
        self.webhook.timeout() + Duration::from_secs(1)
    }

    pub async fn generate(&self, req: &GenerateRequest) -> Result<GenerateOutcome> {
        let source = req.source.trim();
        let medium = trimmed(req.medium.as_deref());
        let campaign = trimmed(req.campaign.as_deref());
        let title = trimmed(req.title.as_deref());

        let generated_url = compose(&req.url, source, medium, campaign, title)?;

        let content = title.map(format_title);
        let selection = RecordSelection {
            base_url: req.url.trim(),
            source,
            medium,
            campaign,
            content: content.as_deref(),
            generated_url: &generated_url,
        };

        let (record, warning) = match self.persist(selection).await {
            Ok(record) => {
                info!("Generated and saved UTM URL: {}", generated_url);
                (Some(record), None)
            }
            Err(e) => {
                warn!("UTM URL generated but not saved: {}", e);
                (
                    None,
                    Some(format!(
                        "The URL was generated but couldn't be saved to the database: {}",
                        e.message()
                    )),
                )
            }
        };

        // 结果不等待 webhook，句柄交给调用方
        let notification = self.webhook.notify(WebhookPayload {
            original_url: req.url.clone(),
            generated_url: generated_url.clone(),
            source: source.to_string(),
            medium: medium.unwrap_or_default().to_string(),
            campaign: campaign.unwrap_or_default().to_string(),
            title: req.title.clone().unwrap_or_default(),
        });
        if notification.is_some() {
            debug!("Webhook notification scheduled for {}", generated_url);
        }

        Ok(GenerateOutcome {
            generated_url,
            record,
            warning,
            notification,
        })
    }

    async fn persist(&self, selection: RecordSelection<'_>) -> Result<UrlRecord> {
        let snapshot = self.dimensions.snapshot().await?;
        let record = resolve_record(&snapshot, selection)?;
        self.records.record_generated_url(record).await
    }
}
