//! v1 维度管理端点

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, Result as ActixResult, web};
use std::sync::Arc;
use tracing::trace;

use crate::services::DimensionService;

use super::error_code::ErrorCode;
use super::helpers::{api_result, error_from_utm, json_response, parse_kind};
use super::types::DimensionNameBody;

/// GET /v1/dimensions
pub async fn list_dimensions(
    dimensions: web::Data<Arc<DimensionService>>,
) -> ActixResult<impl Responder> {
    trace!("API: list all dimensions");
    Ok(api_result(
        dimensions.list_all().await.map(|s| s.as_ref().clone()),
    ))
}

/// POST /v1/dimensions/{kind}
pub async fn add_dimension(
    path: web::Path<String>,
    body: web::Json<DimensionNameBody>,
    dimensions: web::Data<Arc<DimensionService>>,
) -> ActixResult<HttpResponse> {
    let kind = match parse_kind(&path) {
        Ok(kind) => kind,
        Err(e) => return Ok(error_from_utm(&e)),
    };

    match dimensions.add_dimension_value(kind, &body.name).await {
        Ok(value) => Ok(json_response(
            StatusCode::CREATED,
            ErrorCode::Success,
            format!("{} added", kind.label()),
            Some(value),
        )),
        Err(e) => Ok(error_from_utm(&e)),
    }
}

/// DELETE /v1/dimensions/{kind}/{name}
pub async fn remove_dimension(
    path: web::Path<(String, String)>,
    dimensions: web::Data<Arc<DimensionService>>,
) -> ActixResult<HttpResponse> {
    let (kind, name) = path.into_inner();
    let kind = match parse_kind(&kind) {
        Ok(kind) => kind,
        Err(e) => return Ok(error_from_utm(&e)),
    };

    match dimensions.remove_dimension_value(kind, &name).await {
        Ok(value) => Ok(json_response(
            StatusCode::OK,
            ErrorCode::Success,
            format!("{} removed", kind.label()),
            Some(value),
        )),
        Err(e) => Ok(error_from_utm(&e)),
    }
}

/// PUT /v1/campaigns/{name}/default
pub async fn set_default_campaign(
    path: web::Path<String>,
    dimensions: web::Data<Arc<DimensionService>>,
) -> ActixResult<HttpResponse> {
    Ok(api_result(dimensions.set_default_campaign(&path).await))
}
