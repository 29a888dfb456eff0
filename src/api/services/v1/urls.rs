//! v1 URL 生成与历史端点

use actix_web::{HttpResponse, Result as ActixResult, web};
use std::sync::Arc;
use tracing::{info, trace};

use crate::services::{
    DEFAULT_HISTORY_LIMIT, DimensionService, FormState, GenerateRequest, UrlRecordService,
    UtmGenerator,
};

use super::helpers::{api_result, error_from_utm, success_response};
use super::types::{GenerateResponse, HistoryQuery, HistoryResponse};

/// POST /v1/urls
///
/// Omitted `campaign` falls back to the default campaign; an empty string
/// generates without one.
pub async fn generate_url(
    body: web::Json<GenerateRequest>,
    dimensions: web::Data<Arc<DimensionService>>,
    generator: web::Data<Arc<UtmGenerator>>,
) -> ActixResult<HttpResponse> {
    let snapshot = match dimensions.snapshot().await {
        Ok(snapshot) => snapshot,
        Err(e) => return Ok(error_from_utm(&e)),
    };

    let mut form = FormState::from_snapshot(&snapshot);
    form.apply_request(&body);

    match generator.generate(&form.to_request()).await {
        Ok(outcome) => {
            info!("API: generated {} (saved: {})", outcome.generated_url, outcome.saved());
            Ok(success_response(GenerateResponse::from(outcome)))
        }
        Err(e) => Ok(error_from_utm(&e)),
    }
}

/// GET /v1/urls?limit=
pub async fn list_urls(
    query: web::Query<HistoryQuery>,
    records: web::Data<Arc<UrlRecordService>>,
) -> ActixResult<HttpResponse> {
    let limit = query.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
    trace!("API: list URL records, limit {}", limit);

    let result = match records.history(limit).await {
        Ok(page) => records.count().await.map(|total| HistoryResponse {
            records: page,
            total,
        }),
        Err(e) => Err(e),
    };

    Ok(api_result(result))
}
