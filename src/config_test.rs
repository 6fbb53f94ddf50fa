use super::*;
use std::collections::HashMap;

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect();
    move |key| map.get(key).cloned()
}

// =============================================================================
// from_lookup
// =============================================================================

#[test]
fn missing_backend_url_is_error() {
    let err = ClientConfig::from_lookup(lookup(&[])).unwrap_err();
    assert!(matches!(err, ConfigError::Missing(BACKEND_URL_VAR)));
}

#[test]
fn blank_backend_url_is_error() {
    let err = ClientConfig::from_lookup(lookup(&[(BACKEND_URL_VAR, "   ")])).unwrap_err();
    assert!(matches!(err, ConfigError::Missing(_)));
}

#[test]
fn backend_url_trailing_slash_trimmed() {
    let config = ClientConfig::from_lookup(lookup(&[
        (BACKEND_URL_VAR, "http://api.local/"),
        ("HOME", "/home/tester"),
    ]))
    .unwrap();
    assert_eq!(config.backend_url, "http://api.local");
    assert_eq!(config.url("/products"), "http://api.local/products");
}

#[test]
fn token_file_defaults_under_home() {
    let config = ClientConfig::from_lookup(lookup(&[
        (BACKEND_URL_VAR, "http://api.local"),
        ("HOME", "/home/tester"),
    ]))
    .unwrap();
    assert_eq!(config.token_file, PathBuf::from("/home/tester/.invento/session.json"));
}

#[test]
fn token_file_override() {
    let config = ClientConfig::from_lookup(lookup(&[
        (BACKEND_URL_VAR, "http://api.local"),
        (TOKEN_FILE_VAR, "/tmp/s.json"),
    ]))
    .unwrap();
    assert_eq!(config.token_file, PathBuf::from("/tmp/s.json"));
}

#[test]
fn timeout_unset_by_default() {
    let config = ClientConfig::from_lookup(lookup(&[(BACKEND_URL_VAR, "http://api.local")])).unwrap();
    assert_eq!(config.request_timeout, None);
}

#[test]
fn timeout_parsed_from_env() {
    let config = ClientConfig::from_lookup(lookup(&[
        (BACKEND_URL_VAR, "http://api.local"),
        (REQUEST_TIMEOUT_VAR, "30"),
    ]))
    .unwrap();
    assert_eq!(config.request_timeout, Some(Duration::from_secs(30)));
}

#[test]
fn timeout_invalid_is_error() {
    let err = ClientConfig::from_lookup(lookup(&[
        (BACKEND_URL_VAR, "http://api.local"),
        (REQUEST_TIMEOUT_VAR, "soon"),
    ]))
    .unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { var: REQUEST_TIMEOUT_VAR, .. }));
}

// =============================================================================
// helpers
// =============================================================================

#[test]
fn parse_timeout_zero_means_none() {
    assert_eq!(parse_timeout(Some("0")).unwrap(), None);
}

#[test]
fn parse_timeout_blank_means_none() {
    assert_eq!(parse_timeout(Some("  ")).unwrap(), None);
    assert_eq!(parse_timeout(None).unwrap(), None);
}

#[test]
fn default_token_file_without_home_is_relative() {
    assert_eq!(default_token_file(None), PathBuf::from("./.invento/session.json"));
    assert_eq!(default_token_file(Some("")), PathBuf::from("./.invento/session.json"));
}

#[test]
fn normalize_base_url_strips_whitespace_and_slashes() {
    assert_eq!(normalize_base_url(" http://x:3000// "), "http://x:3000");
}
