//! Retry for read-only store calls
//!
//! Only lock contention and lost connections are retried. Everything else,
//! constraint violations included, is returned on the first failure.

use std::future::Future;
use std::time::Duration;

use sea_orm::DbErr;
use sea_orm::error::RuntimeErr;
use tracing::{debug, warn};

use crate::config::DatabaseConfig;

/// Driver codes for lock contention: MySQL 1213/1205, Postgres 40001/40P01, SQLite 5/6
const CONTENTION_CODES: &[&str] = &["1213", "1205", "40001", "40P01", "5", "6"];

/// Message fragments for drivers that do not expose a code
const CONTENTION_MESSAGES: &[&str] = &[
    "deadlock",
    "lock wait timeout",
    "database is locked",
    "serialization failure",
];

fn mentions_contention(message: &str) -> bool {
    let message = message.to_lowercase();
    CONTENTION_MESSAGES.iter().any(|m| message.contains(m))
}

fn is_contention(err: &RuntimeErr) -> bool {
    match err {
        RuntimeErr::SqlxError(sqlx_err) => {
            let code = sqlx_err
                .as_database_error()
                .and_then(|db_err| db_err.code().map(|c| c.into_owned()));
            match code {
                Some(code) => CONTENTION_CODES.contains(&code.as_str()),
                None => mentions_contention(&sqlx_err.to_string()),
            }
        }
        RuntimeErr::Internal(msg) => mentions_contention(msg),
        #[allow(unreachable_patterns)]
        _ => false,
    }
}

pub fn is_retryable_error(err: &DbErr) -> bool {
    match err {
        DbErr::ConnectionAcquire(_) | DbErr::Conn(_) => true,
        DbErr::Exec(inner) | DbErr::Query(inner) => is_contention(inner),
        _ => false,
    }
}

/// Attempts and backoff bounds, taken from `[database]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl From<&DatabaseConfig> for RetryConfig {
    fn from(config: &DatabaseConfig) -> Self {
        Self {
            max_retries: config.retry_count,
            base_delay_ms: config.retry_base_delay_ms,
            max_delay_ms: config.retry_max_delay_ms,
        }
    }
}

impl RetryConfig {
    /// Delay before retry number `attempt` (1-based): doubling, capped, plus up to 25% jitter
    fn delay_for(&self, attempt: u32) -> Duration {
        Duration::from_millis(calculate_backoff(
            attempt,
            self.base_delay_ms,
            self.max_delay_ms,
        ))
    }
}

fn calculate_backoff(attempt: u32, base_ms: u64, max_ms: u64) -> u64 {
    let factor = 1u64
        .checked_shl(attempt.saturating_sub(1))
        .unwrap_or(u64::MAX);
    let doubled = base_ms.saturating_mul(factor);
    let capped = doubled.min(max_ms);
    capped.saturating_add(rand::random_range(0..=capped / 4))
}

/// Run `operation`, retrying transient failures up to `config.max_retries` times
pub async fn with_retry<T, F, Fut>(
    label: &str,
    config: RetryConfig,
    mut operation: F,
) -> Result<T, DbErr>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, DbErr>>,
{
    let mut retries = 0;
    loop {
        let err = match operation().await {
            Ok(value) => {
                if retries > 0 {
                    debug!("{} recovered after {} retries", label, retries);
                }
                return Ok(value);
            }
            Err(err) => err,
        };

        if retries >= config.max_retries || !is_retryable_error(&err) {
            debug!("{} failed: {}", label, err);
            return Err(err);
        }

        retries += 1;
        let delay = config.delay_for(retries);
        warn!(
            "{} hit a transient error ({}), retry {}/{} in {:?}",
            label, err, retries, config.max_retries, delay
        );
        tokio::time::sleep(delay).await;
    }
}
