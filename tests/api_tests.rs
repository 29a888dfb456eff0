//! HTTP API integration tests
//!
//! Exercises the v1 endpoints and the health check through the same
//! `configure_app` the server uses.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use actix_web::App;
use serde_json::{Value, json};
use tempfile::TempDir;

use utmkit::api::services::AppStartTime;
use utmkit::config::{AppConfig, DatabaseConfig, SeedConfig};
use utmkit::runtime::lifetime::startup::StartupContext;
use utmkit::runtime::modes::server::configure_app;
use utmkit::storage::SeaOrmStorage;

async fn create_context() -> (TempDir, Arc<StartupContext>) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("api_test.db");
    let config = AppConfig {
        database: DatabaseConfig {
            database_url: format!("sqlite://{}?mode=rwc", db_path.display()),
            ..DatabaseConfig::default()
        },
        seed: SeedConfig {
            sources: vec!["google".into(), "newsletter".into()],
            mediums: vec!["cpc".into()],
            default_campaign: "live_by_design".into(),
        },
        ..AppConfig::default()
    };

    let storage = Arc::new(
        SeaOrmStorage::new(&config.database)
            .await
            .expect("Failed to create storage"),
    );
    storage.seed(&config.seed).await.expect("Failed to seed");

    let context = StartupContext::from_storage(storage, &config)
        .await
        .expect("Failed to build context");
    (temp_dir, Arc::new(context))
}

/// Create a test app with every route registered
macro_rules! api_app {
    ($ctx:expr) => {{
        let ctx = $ctx.clone();
        test::init_service(App::new().configure(move |cfg| {
            configure_app(
                cfg,
                &ctx,
                AppStartTime {
                    start_datetime: chrono::Utc::now(),
                },
            )
        }))
        .await
    }};
}

// =============================================================================
// Dimension Tests
// =============================================================================

#[actix_web::test]
async fn test_list_dimensions() {
    let (_dir, ctx) = create_context().await;
    let app = api_app!(ctx);

    let req = TestRequest::get().uri("/v1/dimensions").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 0);
    assert_eq!(body["data"]["sources"].as_array().unwrap().len(), 2);
    assert_eq!(body["data"]["campaigns"][0]["name"], "live_by_design");
    assert_eq!(body["data"]["campaigns"][0]["is_default"], true);
    assert_eq!(body["data"]["campaigns"][0]["kind"], "campaign");
}

#[actix_web::test]
async fn test_add_source_created() {
    let (_dir, ctx) = create_context().await;
    let app = api_app!(ctx);

    let req = TestRequest::post()
        .uri("/v1/dimensions/source")
        .set_json(json!({ "name": "podcast" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 0);
    assert_eq!(body["message"], "Source added");
    assert_eq!(body["data"]["name"], "podcast");
    assert!(ctx.dimensions.cached().contains(
        utmkit::storage::DimensionKind::Source,
        "podcast"
    ));
}

#[actix_web::test]
async fn test_add_duplicate_conflict() {
    let (_dir, ctx) = create_context().await;
    let app = api_app!(ctx);

    let req = TestRequest::post()
        .uri("/v1/dimensions/source")
        .set_json(json!({ "name": "google" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 2000);
    assert!(body.get("data").is_none());
}

#[actix_web::test]
async fn test_add_blank_name_bad_request() {
    let (_dir, ctx) = create_context().await;
    let app = api_app!(ctx);

    let req = TestRequest::post()
        .uri("/v1/dimensions/medium")
        .set_json(json!({ "name": "  " }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 1000);
}

#[actix_web::test]
async fn test_unknown_kind_bad_request() {
    let (_dir, ctx) = create_context().await;
    let app = api_app!(ctx);

    let req = TestRequest::post()
        .uri("/v1/dimensions/channel")
        .set_json(json!({ "name": "tv" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_malformed_json_uses_envelope() {
    let (_dir, ctx) = create_context().await;
    let app = api_app!(ctx);

    let req = TestRequest::post()
        .uri("/v1/dimensions/source")
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 1000);
}

#[actix_web::test]
async fn test_remove_default_campaign_conflict() {
    let (_dir, ctx) = create_context().await;
    let app = api_app!(ctx);

    let req = TestRequest::delete()
        .uri("/v1/dimensions/campaign/live_by_design")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 2002);
}

#[actix_web::test]
async fn test_remove_missing_not_found() {
    let (_dir, ctx) = create_context().await;
    let app = api_app!(ctx);

    let req = TestRequest::delete()
        .uri("/v1/dimensions/medium/telegraph")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 2001);
}

#[actix_web::test]
async fn test_set_default_then_remove_old_default() {
    let (_dir, ctx) = create_context().await;
    let app = api_app!(ctx);

    let req = TestRequest::post()
        .uri("/v1/dimensions/campaign")
        .set_json(json!({ "name": "spring" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let req = TestRequest::put()
        .uri("/v1/campaigns/spring/default")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["is_default"], true);

    let req = TestRequest::delete()
        .uri("/v1/dimensions/campaign/live_by_design")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Campaign removed");
}

// =============================================================================
// URL Tests
// =============================================================================

#[actix_web::test]
async fn test_generate_uses_default_campaign() {
    let (_dir, ctx) = create_context().await;
    let app = api_app!(ctx);

    let req = TestRequest::post()
        .uri("/v1/urls")
        .set_json(json!({
            "url": "example.com",
            "source": "google",
            "medium": "cpc",
            "title": "Big Sale",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 0);
    assert_eq!(
        body["data"]["generated_url"],
        "https://example.com/?utm_source=google&utm_medium=cpc&utm_campaign=live_by_design&utm_content=big_sale"
    );
    assert_eq!(body["data"]["saved"], true);
    assert!(body["data"].get("warning").is_none());
}

#[actix_web::test]
async fn test_generate_empty_campaign_omits_param() {
    let (_dir, ctx) = create_context().await;
    let app = api_app!(ctx);

    let req = TestRequest::post()
        .uri("/v1/urls")
        .set_json(json!({
            "url": "example.com",
            "source": "google",
            "campaign": "",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["generated_url"], "https://example.com/?utm_source=google");
}

#[actix_web::test]
async fn test_generate_missing_url() {
    let (_dir, ctx) = create_context().await;
    let app = api_app!(ctx);

    let req = TestRequest::post()
        .uri("/v1/urls")
        .set_json(json!({ "url": "", "source": "google" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 3000);
    assert_eq!(body["message"], "Please enter a valid URL");
}

#[actix_web::test]
async fn test_generate_unknown_source_warns() {
    let (_dir, ctx) = create_context().await;
    let app = api_app!(ctx);

    let req = TestRequest::post()
        .uri("/v1/urls")
        .set_json(json!({ "url": "example.com", "source": "fax" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["saved"], false);
    assert!(
        body["data"]["warning"]
            .as_str()
            .unwrap()
            .contains("couldn't be saved")
    );
}

#[actix_web::test]
async fn test_list_urls() {
    let (_dir, ctx) = create_context().await;
    let app = api_app!(ctx);

    for path in ["one", "two", "three"] {
        let req = TestRequest::post()
            .uri("/v1/urls")
            .set_json(json!({ "url": format!("example.com/{}", path), "source": "google" }))
            .to_request();
        test::call_service(&app, req).await;
    }

    let req = TestRequest::get().uri("/v1/urls?limit=2").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["total"], 3);
    let records = body["data"]["records"].as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["base_url"], "example.com/three");
}

// =============================================================================
// Health Tests
// =============================================================================

#[actix_web::test]
async fn test_health() {
    let (_dir, ctx) = create_context().await;
    let app = api_app!(ctx);

    let req = TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["status"], "healthy");
    assert_eq!(body["data"]["storage"]["backend"], "sqlite");
}
