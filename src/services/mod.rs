//! Service layer for business logic
//!
//! Shared between the HTTP API and the CLI.

mod dimension_service;
mod form_state;
mod generator;
mod url_record_service;
mod webhook;

pub use dimension_service::{DimensionService, normalize_name};
pub use form_state::FormState;
pub use generator::{GenerateOutcome, GenerateRequest, UtmGenerator};
pub use url_record_service::{
    DEFAULT_HISTORY_LIMIT, MAX_HISTORY_LIMIT, RecordSelection, UrlRecordService, resolve_record,
};
pub use webhook::{WebhookNotifier, WebhookPayload};
