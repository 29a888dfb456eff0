//! HTTP API
//!
//! JSON endpoints under `/v1` plus a `/health` check.

pub mod services;
