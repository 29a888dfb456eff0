//! Fire-and-forget webhook notification for generated URLs
//!
//! Delivery runs on a spawned task. Failures are logged and never reach
//! the caller of the generate flow. The task only runs while its runtime
//! is alive, so one-shot callers (the CLI) await the returned handle.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use ureq::Agent;

use crate::config::WebhookConfig;
use crate::errors::{Result, UtmError};

/// JSON body posted to the webhook endpoint
///
/// Absent selections are sent as empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookPayload {
    pub original_url: String,
    pub generated_url: String,
    pub source: String,
    pub medium: String,
    pub campaign: String,
    pub title: String,
}

pub struct WebhookNotifier {
    url: Option<String>,
    timeout: Duration,
    agent: Agent,
}

impl WebhookNotifier {
    pub fn new(config: &WebhookConfig) -> Self {
        let url = config
            .url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .map(str::to_string);

        let timeout = Duration::from_secs(config.timeout_secs.max(1));
        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .build()
            .into();

        Self {
            url,
            timeout,
            agent,
        }
    }

    /// A notifier with no endpoint; every notification is skipped
    pub fn disabled() -> Self {
        Self::new(&WebhookConfig {
            url: None,
            ..WebhookConfig::default()
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.url.is_some()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// 同步发送（在 spawn_blocking 中调用）
    fn post_sync(agent: &Agent, url: &str, payload: &WebhookPayload) -> Result<()> {
        agent
            .post(url)
            .send_json(payload)
            .map_err(|e| UtmError::webhook(format!("POST {} failed: {}", url, e)))?;
        Ok(())
    }

    /// Deliver one notification and wait for the outcome
    pub async fn send(&self, payload: WebhookPayload) -> Result<()> {
        let Some(url) = self.url.clone() else {
            debug!("Webhook not configured, skipping notification");
            return Ok(());
        };
        let agent = self.agent.clone();

        tokio::task::spawn_blocking(move || Self::post_sync(&agent, &url, &payload))
            .await
            .map_err(|e| UtmError::webhook(format!("Webhook task failed: {}", e)))?
    }

    /// Spawn delivery on a background task
    ///
    /// Returns `None` when no endpoint is configured. Dropping the handle
    /// detaches the task; it then finishes only if the runtime outlives it.
    pub fn notify(self: &Arc<Self>, payload: WebhookPayload) -> Option<JoinHandle<()>> {
        if !self.is_enabled() {
            return None;
        }

        let notifier = Arc::clone(self);
        Some(tokio::spawn(async move {
            let generated = payload.generated_url.clone();
            match notifier.send(payload).await {
                Ok(()) => debug!("Webhook delivered for {}", generated),
                Err(e) => warn!("Webhook notification failed: {}", e),
            }
        }))
    }
}
