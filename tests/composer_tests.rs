//! URL composition tests through the public `utm` API

use url::Url;
use utmkit::errors::UtmError;
use utmkit::utm::{UTM_CAMPAIGN, UTM_CONTENT, UTM_MEDIUM, UTM_SOURCE, compose, format_title};

fn query_of(generated: &str) -> Vec<(String, String)> {
    Url::parse(generated)
        .expect("generated URL must parse")
        .query_pairs()
        .into_owned()
        .collect()
}

#[test]
fn test_bare_domain_gets_https() {
    let url = compose("example.com", "google", Some("cpc"), Some("summer_sale"), None).unwrap();
    assert_eq!(
        url,
        "https://example.com/?utm_source=google&utm_medium=cpc&utm_campaign=summer_sale"
    );
}

#[test]
fn test_existing_query_and_title() {
    let url = compose(
        "https://shop.example.com/item?id=42",
        "newsletter",
        Some("email"),
        None,
        Some("Q3 Launch!! Campaign"),
    )
    .unwrap();

    let pairs = query_of(&url);
    assert_eq!(pairs[0], ("id".to_string(), "42".to_string()));
    assert_eq!(pairs[1].0, UTM_SOURCE);
    assert_eq!(pairs[2].0, UTM_MEDIUM);
    assert_eq!(pairs[3], (UTM_CONTENT.to_string(), "q3_launch_campaign".to_string()));
    assert!(!pairs.iter().any(|(k, _)| k == UTM_CAMPAIGN));
}

#[test]
fn test_regenerate_replaces_previous_tags() {
    let first = compose("example.com", "google", Some("cpc"), None, None).unwrap();
    let second = compose(&first, "bing", Some("organic"), None, None).unwrap();

    assert_eq!(
        second,
        "https://example.com/?utm_source=bing&utm_medium=organic"
    );
}

#[test]
fn test_whitespace_trimmed() {
    let url = compose("  example.com  ", "  google ", None, None, None).unwrap();
    assert_eq!(url, "https://example.com/?utm_source=google");
}

#[test]
fn test_required_fields() {
    assert!(matches!(
        compose("", "google", None, None, None),
        Err(UtmError::MissingBaseUrl)
    ));
    assert!(matches!(
        compose("example.com", " ", None, None, None),
        Err(UtmError::MissingSource)
    ));
}

#[test]
fn test_title_is_formatted_once() {
    let formatted = format_title("Hello   World");
    assert_eq!(formatted, "hello_world");
    assert_eq!(format_title(&formatted), formatted);

    let url = compose("example.com", "google", None, None, Some(&formatted)).unwrap();
    assert!(url.ends_with("utm_content=hello_world"));
}
