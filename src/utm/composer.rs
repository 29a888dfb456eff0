use tracing::trace;
use url::Url;

use super::title::format_title;
use crate::errors::{Result, UtmError};

pub const UTM_SOURCE: &str = "utm_source";
pub const UTM_MEDIUM: &str = "utm_medium";
pub const UTM_CAMPAIGN: &str = "utm_campaign";
pub const UTM_CONTENT: &str = "utm_content";

/// Prefix `https://` unless the input already starts with `http://` or
/// `https://` (ASCII case-insensitive)
pub fn normalize_base_url(input: &str) -> String {
    let has_scheme = ["http://", "https://"].iter().any(|scheme| {
        input
            .get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    });

    if has_scheme {
        input.to_string()
    } else {
        format!("https://{}", input)
    }
}

/// Build the UTM-decorated URL
///
/// Existing query parameters keep their position. A UTM parameter that is
/// already present is overwritten in place (later duplicates are dropped),
/// otherwise it is appended in the order source, medium, campaign, content.
/// Empty optional values are skipped.
pub fn compose(
    base_url: &str,
    source: &str,
    medium: Option<&str>,
    campaign: Option<&str>,
    content_title: Option<&str>,
) -> Result<String> {
    let base_url = base_url.trim();
    if base_url.is_empty() {
        return Err(UtmError::MissingBaseUrl);
    }

    let source = source.trim();
    if source.is_empty() {
        return Err(UtmError::MissingSource);
    }

    let normalized = normalize_base_url(base_url);
    let mut url = Url::parse(&normalized)
        .map_err(|e| UtmError::invalid_url(format!("'{}': {}", base_url, e)))?;

    let mut pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();

    set_param(&mut pairs, UTM_SOURCE, source);
    if let Some(medium) = non_empty(medium) {
        set_param(&mut pairs, UTM_MEDIUM, medium);
    }
    if let Some(campaign) = non_empty(campaign) {
        set_param(&mut pairs, UTM_CAMPAIGN, campaign);
    }
    if let Some(title) = non_empty(content_title) {
        set_param(&mut pairs, UTM_CONTENT, &format_title(title));
    }

    url.query_pairs_mut().clear().extend_pairs(pairs.iter());

    trace!("Composed UTM URL: {}", url);
    Ok(url.into())
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn set_param(pairs: &mut Vec<(String, String)>, key: &str, value: &str) {
    match pairs.iter().position(|(k, _)| k == key) {
        Some(first) => {
            pairs[first].1 = value.to_string();
            let mut index = 0;
            pairs.retain(|(k, _)| {
                let keep = index == first || k != key;
                index += 1;
                keep
            });
        }
        None => pairs.push((key.to_string(), value.to_string())),
    }
}
