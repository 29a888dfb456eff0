//! v1 API 路由配置

use actix_web::web;

use super::dimensions::{add_dimension, list_dimensions, remove_dimension, set_default_campaign};
use super::urls::{generate_url, list_urls};

/// 维度路由 `/dimensions`
pub fn dimensions_routes() -> actix_web::Scope {
    web::scope("/dimensions")
        .route("", web::get().to(list_dimensions))
        .route("/{kind}", web::post().to(add_dimension))
        .route("/{kind}/{name}", web::delete().to(remove_dimension))
}

/// Campaign 路由 `/campaigns`
pub fn campaigns_routes() -> actix_web::Scope {
    web::scope("/campaigns").route("/{name}/default", web::put().to(set_default_campaign))
}

/// URL 路由 `/urls`
pub fn urls_routes() -> actix_web::Scope {
    web::scope("/urls")
        .route("", web::post().to(generate_url))
        .route("", web::get().to(list_urls))
}

/// `/v1` 下的全部路由
pub fn v1_routes() -> actix_web::Scope {
    web::scope("/v1")
        .service(dimensions_routes())
        .service(campaigns_routes())
        .service(urls_routes())
}
