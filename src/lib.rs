//! utmkit - UTM campaign URL builder
//!
//! Composes URLs tagged with `utm_source`, `utm_medium`, `utm_campaign` and
//! `utm_content` from persisted lookup values, and logs every generated URL.
//!
//! # Features
//! - **server**: HTTP JSON API (default)
//! - **cli**: Command-line interface (default)
//!
//! # Architecture
//! - `utm`: Pure URL composition and title formatting
//! - `storage`: SeaORM backend (dimension tables, URL log, seeding)
//! - `services`: Dimension management, generate flow, webhook, form state
//! - `api`: HTTP endpoints
//! - `interfaces`: CLI commands
//! - `config`: Configuration loading
//! - `runtime`: Startup wiring and execution modes
//! - `system`: Logging

#[cfg(feature = "server")]
pub mod api;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod errors;
pub mod interfaces;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utm;
