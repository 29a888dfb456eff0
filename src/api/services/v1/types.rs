//! v1 API 类型定义

use serde::{Deserialize, Serialize};

use crate::services::GenerateOutcome;
use crate::storage::UrlRecord;

/// 统一响应信封
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ApiResponse<T> {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct DimensionNameBody {
    pub name: String,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct HistoryQuery {
    pub limit: Option<u64>,
}

#[derive(Serialize, Clone, Debug)]
pub struct GenerateResponse {
    pub generated_url: String,
    pub saved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<UrlRecord>,
}

impl From<GenerateOutcome> for GenerateResponse {
    fn from(outcome: GenerateOutcome) -> Self {
        Self {
            saved: outcome.saved(),
            generated_url: outcome.generated_url,
            warning: outcome.warning,
            record: outcome.record,
        }
    }
}

#[derive(Serialize, Clone, Debug)]
pub struct HistoryResponse {
    pub records: Vec<UrlRecord>,
    pub total: u64,
}
