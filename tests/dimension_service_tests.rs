//! Dimension service tests
//!
//! Add / remove / set-default through `DimensionService`, checking both the
//! returned errors and the cached snapshot afterwards.

use std::sync::Arc;

use tempfile::TempDir;

use utmkit::config::{DatabaseConfig, SeedConfig};
use utmkit::errors::UtmError;
use utmkit::services::DimensionService;
use utmkit::storage::{DimensionKind, NewUrlRecord, SeaOrmStorage};

async fn create_service() -> (TempDir, Arc<DimensionService>) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("dimension_test.db");
    let config = DatabaseConfig {
        database_url: format!("sqlite://{}?mode=rwc", db_path.display()),
        ..DatabaseConfig::default()
    };

    let storage = Arc::new(
        SeaOrmStorage::new(&config)
            .await
            .expect("Failed to create storage"),
    );
    storage
        .seed(&SeedConfig {
            sources: vec!["google".into(), "newsletter".into()],
            mediums: vec!["cpc".into()],
            default_campaign: "live_by_design".into(),
        })
        .await
        .expect("Failed to seed");

    let service = DimensionService::new(storage)
        .await
        .expect("Failed to create dimension service");
    (temp_dir, Arc::new(service))
}

#[tokio::test]
async fn test_initial_snapshot_is_loaded() {
    let (_dir, service) = create_service().await;

    let snapshot = service.cached();
    assert_eq!(snapshot.names(DimensionKind::Source), vec!["google", "newsletter"]);
    assert_eq!(snapshot.names(DimensionKind::Medium), vec!["cpc"]);
    assert_eq!(
        snapshot.default_campaign().map(|c| c.name.as_str()),
        Some("live_by_design")
    );
}

#[tokio::test]
async fn test_add_refreshes_snapshot() {
    let (_dir, service) = create_service().await;

    let value = service
        .add_dimension_value(DimensionKind::Source, "podcast")
        .await
        .unwrap();
    assert_eq!(value.kind, DimensionKind::Source);
    assert_eq!(value.name, "podcast");
    assert!(!value.is_default);

    let snapshot = service.snapshot().await.unwrap();
    let podcast = snapshot.find(DimensionKind::Source, "podcast").unwrap();
    assert_eq!(podcast.id, value.id);
}

#[tokio::test]
async fn test_add_trims_name() {
    let (_dir, service) = create_service().await;

    let value = service
        .add_dimension_value(DimensionKind::Medium, "  video  ")
        .await
        .unwrap();
    assert_eq!(value.name, "video");
    assert!(service.cached().contains(DimensionKind::Medium, "video"));
}

#[tokio::test]
async fn test_add_duplicate_leaves_set_unchanged() {
    let (_dir, service) = create_service().await;
    let before = service.list_all().await.unwrap();

    let err = service
        .add_dimension_value(DimensionKind::Source, "google")
        .await
        .unwrap_err();
    assert!(matches!(err, UtmError::DuplicateName(_)));

    let after = service.list_all().await.unwrap();
    assert_eq!(before.sources, after.sources);
}

#[tokio::test]
async fn test_add_blank_name_rejected() {
    let (_dir, service) = create_service().await;

    let err = service
        .add_dimension_value(DimensionKind::Campaign, "   ")
        .await
        .unwrap_err();
    assert!(matches!(err, UtmError::Validation(_)));
    assert_eq!(service.cached().campaigns.len(), 1);
}

#[tokio::test]
async fn test_added_campaign_is_not_default() {
    let (_dir, service) = create_service().await;

    let spring = service
        .add_dimension_value(DimensionKind::Campaign, "spring")
        .await
        .unwrap();
    assert!(!spring.is_default);

    let snapshot = service.cached();
    assert_eq!(snapshot.campaigns.iter().filter(|c| c.is_default).count(), 1);
}

#[tokio::test]
async fn test_remove_default_campaign_rejected() {
    let (_dir, service) = create_service().await;

    let err = service
        .remove_dimension_value(DimensionKind::Campaign, "live_by_design")
        .await
        .unwrap_err();
    assert!(matches!(err, UtmError::CannotRemoveDefault(_)));

    let snapshot = service.list_all().await.unwrap();
    let campaign = snapshot.find(DimensionKind::Campaign, "live_by_design").unwrap();
    assert!(campaign.is_default);
}

#[tokio::test]
async fn test_remove_non_default_campaign() {
    let (_dir, service) = create_service().await;
    service
        .add_dimension_value(DimensionKind::Campaign, "spring")
        .await
        .unwrap();

    let removed = service
        .remove_dimension_value(DimensionKind::Campaign, "spring")
        .await
        .unwrap();
    assert_eq!(removed.name, "spring");

    let snapshot = service.list_all().await.unwrap();
    assert!(!snapshot.contains(DimensionKind::Campaign, "spring"));
    assert!(snapshot.contains(DimensionKind::Campaign, "live_by_design"));
}

#[tokio::test]
async fn test_remove_missing_value() {
    let (_dir, service) = create_service().await;

    let err = service
        .remove_dimension_value(DimensionKind::Medium, "carrier_pigeon")
        .await
        .unwrap_err();
    assert!(matches!(err, UtmError::NotFound(_)));
}

#[tokio::test]
async fn test_remove_referenced_source_in_use() {
    let (_dir, service) = create_service().await;
    let google = service
        .cached()
        .find(DimensionKind::Source, "google")
        .cloned()
        .unwrap();

    service
        .storage()
        .insert_url_record(&NewUrlRecord {
            base_url: "example.com".to_string(),
            source_id: google.id,
            medium_id: None,
            campaign_id: None,
            content: None,
            generated_url: "https://example.com/?utm_source=google".to_string(),
        })
        .await
        .unwrap();

    let err = service
        .remove_dimension_value(DimensionKind::Source, "google")
        .await
        .unwrap_err();
    assert!(matches!(err, UtmError::InUse(_)));
    assert!(service.cached().contains(DimensionKind::Source, "google"));
}

#[tokio::test]
async fn test_set_default_campaign_swaps() {
    let (_dir, service) = create_service().await;
    service
        .add_dimension_value(DimensionKind::Campaign, "spring")
        .await
        .unwrap();

    let value = service.set_default_campaign("spring").await.unwrap();
    assert!(value.is_default);

    let snapshot = service.cached();
    assert_eq!(
        snapshot.default_campaign().map(|c| c.name.as_str()),
        Some("spring")
    );
    assert!(!snapshot.find(DimensionKind::Campaign, "live_by_design").unwrap().is_default);

    // 旧默认值现在可以删除
    service
        .remove_dimension_value(DimensionKind::Campaign, "live_by_design")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_set_default_unknown_campaign() {
    let (_dir, service) = create_service().await;

    let err = service.set_default_campaign("winter").await.unwrap_err();
    assert!(matches!(err, UtmError::NotFound(_)));
    assert_eq!(
        service.cached().default_campaign().map(|c| c.name.as_str()),
        Some("live_by_design")
    );
}

#[tokio::test]
async fn test_concurrent_adds_all_land() {
    let (_dir, service) = create_service().await;

    let mut handles = Vec::new();
    for i in 0..5 {
        let service = service.clone();
        handles.push(tokio::spawn(async move {
            service
                .add_dimension_value(DimensionKind::Source, &format!("partner_{}", i))
                .await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let snapshot = service.list_all().await.unwrap();
    assert_eq!(snapshot.sources.len(), 7);
}
