//! v1 JSON API
//!
//! - 维度查询与增删
//! - 默认 campaign 切换
//! - URL 生成与历史

mod dimensions;
pub mod error_code;
mod helpers;
pub mod routes;
mod types;
mod urls;

pub use types::*;

pub use helpers::{api_result, error_from_utm, error_response, success_response};

pub use error_code::ErrorCode;

pub use dimensions::{add_dimension, list_dimensions, remove_dimension, set_default_campaign};
pub use urls::{generate_url, list_urls};

