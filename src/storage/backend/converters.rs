use chrono::Utc;

use crate::storage::models::{DimensionKind, DimensionValue, NewUrlRecord, UrlRecord};
use migration::entities::{campaign, utm_medium, utm_source, utm_url};

pub fn source_to_value(model: utm_source::Model) -> DimensionValue {
    DimensionValue {
        id: model.id,
        kind: DimensionKind::Source,
        name: model.name,
        is_default: false,
        created_at: model.created_at,
    }
}

pub fn medium_to_value(model: utm_medium::Model) -> DimensionValue {
    DimensionValue {
        id: model.id,
        kind: DimensionKind::Medium,
        name: model.name,
        is_default: false,
        created_at: model.created_at,
    }
}

pub fn campaign_to_value(model: campaign::Model) -> DimensionValue {
    DimensionValue {
        id: model.id,
        kind: DimensionKind::Campaign,
        name: model.name,
        is_default: model.is_default,
        created_at: model.created_at,
    }
}

/// 将 Sea-ORM Model 转换为 UrlRecord
pub fn model_to_url_record(model: utm_url::Model) -> UrlRecord {
    UrlRecord {
        id: model.id,
        base_url: model.base_url,
        source_id: model.source_id,
        medium_id: model.medium_id,
        campaign_id: model.campaign_id,
        content: model.content,
        generated_url: model.generated_url,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

/// 新记录转换为 ActiveModel，id 由数据库分配
pub fn new_record_to_active_model(record: &NewUrlRecord) -> utm_url::ActiveModel {
    use sea_orm::ActiveValue::*;

    let now = Utc::now();
    utm_url::ActiveModel {
        id: NotSet,
        base_url: Set(record.base_url.clone()),
        source_id: Set(record.source_id),
        medium_id: Set(record.medium_id),
        campaign_id: Set(record.campaign_id),
        content: Set(record.content.clone()),
        generated_url: Set(record.generated_url.clone()),
        created_at: Set(now),
        updated_at: Set(now),
    }
}
