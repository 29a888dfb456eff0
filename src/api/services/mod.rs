pub mod health;
pub mod v1;

pub use health::{AppStartTime, HealthService, health_routes};
pub use v1::routes::v1_routes;
