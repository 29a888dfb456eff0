//! Server mode
//!
//! Starts the HTTP server with the v1 API and the health check.

use actix_web::http::StatusCode;
use actix_web::{App, HttpServer, middleware::Compress, web};
use anyhow::Result;
use std::sync::Arc;
use tracing::{error, info};

use crate::api::services::v1::{ErrorCode, error_response};
use crate::api::services::{AppStartTime, health_routes, v1_routes};
use crate::config::AppConfig;
use crate::runtime::lifetime::startup::{StartupContext, prepare_startup};

/// JSON body errors use the same envelope as every other API error
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let response = error_response(StatusCode::BAD_REQUEST, ErrorCode::BadRequest, &err.to_string());
        actix_web::error::InternalError::from_response(err, response).into()
    })
}

/// Register shared state and routes
///
/// Used by `run_server` and by the HTTP tests.
pub fn configure_app(
    cfg: &mut web::ServiceConfig,
    context: &StartupContext,
    app_start_time: AppStartTime,
) {
    cfg.app_data(web::Data::new(context.storage.clone()))
        .app_data(web::Data::new(context.dimensions.clone()))
        .app_data(web::Data::new(context.records.clone()))
        .app_data(web::Data::new(context.generator.clone()))
        .app_data(web::Data::new(app_start_time))
        .app_data(json_config())
        .service(health_routes())
        .service(v1_routes());
}

/// Run the HTTP server
///
/// **Note**: Logging must be initialized before calling this function
pub async fn run_server(config: Arc<AppConfig>) -> Result<()> {
    let app_start_time = AppStartTime {
        start_datetime: chrono::Utc::now(),
    };

    let context = Arc::new(prepare_startup(&config).await.map_err(|e| {
        error!("Server startup failed: {}", e);
        e
    })?);

    let workers = config.server.workers.max(1);
    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    info!("Starting server at http://{} with {} workers", bind_address, workers);

    let server = HttpServer::new(move || {
        let context = context.clone();
        let app_start_time = app_start_time.clone();
        App::new()
            .wrap(Compress::default())
            .configure(move |cfg| configure_app(cfg, &context, app_start_time))
    })
    .workers(workers)
    .bind(&bind_address)?;

    server.run().await?;

    info!("Server stopped");
    Ok(())
}
