//! Configuration
//!
//! `AppConfig` is loaded once at start-up and handed to the components that
//! need it (storage, webhook notifier, HTTP server). Nothing reads it from a
//! global.

mod structs;

pub use structs::*;
