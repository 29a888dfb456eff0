//! UTM URL composition
//!
//! Pure, synchronous helpers: no store access, no side effects.

mod composer;
mod title;

pub use composer::{
    UTM_CAMPAIGN, UTM_CONTENT, UTM_MEDIUM, UTM_SOURCE, compose, normalize_base_url,
};
pub use title::format_title;
