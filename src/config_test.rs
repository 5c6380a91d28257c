use super::*;
use std::collections::HashMap;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |key| map.get(key).cloned()
}

#[test]
fn from_lookup_defaults() {
    let cfg = ApiConfig::from_lookup(lookup(&[])).unwrap();
    assert_eq!(cfg.base_url, DEFAULT_API_URL);
    assert_eq!(cfg.token, None);
    assert_eq!(cfg.timeouts, Timeouts::default());
}

#[test]
fn from_lookup_parses_overrides() {
    let cfg = ApiConfig::from_lookup(lookup(&[
        (ENV_API_URL, "https://inventario.example.test/api/"),
        (ENV_API_TOKEN, "  tok-123 "),
        (ENV_REQUEST_TIMEOUT, "42"),
        (ENV_CONNECT_TIMEOUT, "7"),
    ]))
    .unwrap();
    assert_eq!(cfg.base_url, "https://inventario.example.test/api");
    assert_eq!(cfg.token.as_deref(), Some("tok-123"));
    assert_eq!(cfg.timeouts, Timeouts { request_secs: 42, connect_secs: 7 });
}

#[test]
fn blank_token_means_none() {
    let cfg = ApiConfig::from_lookup(lookup(&[(ENV_API_TOKEN, "   ")])).unwrap();
    assert_eq!(cfg.token, None);
}

#[test]
fn non_http_url_errors() {
    let err = ApiConfig::from_lookup(lookup(&[(ENV_API_URL, "ftp://host")])).unwrap_err();
    assert!(err.to_string().contains("http://"));
    assert!(ApiConfig::new("  ").is_err());
}

#[test]
fn bad_timeout_errors() {
    let err = ApiConfig::from_lookup(lookup(&[(ENV_REQUEST_TIMEOUT, "soon")])).unwrap_err();
    assert!(err.to_string().contains(ENV_REQUEST_TIMEOUT));
    let err = ApiConfig::from_lookup(lookup(&[(ENV_CONNECT_TIMEOUT, "0")])).unwrap_err();
    assert!(err.to_string().contains("greater than zero"));
}

#[test]
fn overrides_replace_env_values() {
    let cfg = ApiConfig::from_lookup(lookup(&[(ENV_API_TOKEN, "env-token")]))
        .unwrap()
        .with_overrides(Some("http://127.0.0.1:9000/"), Some("flag-token"))
        .unwrap();
    assert_eq!(cfg.base_url, "http://127.0.0.1:9000");
    assert_eq!(cfg.token.as_deref(), Some("flag-token"));

    let unchanged = cfg.clone().with_overrides(None, None).unwrap();
    assert_eq!(unchanged, cfg);
}

#[test]
fn url_for_joins_with_single_slash() {
    let cfg = ApiConfig::new("http://localhost:8000/api/").unwrap();
    assert_eq!(cfg.url_for("/products/3"), "http://localhost:8000/api/products/3");
    assert_eq!(cfg.url_for("dashboard/stats"), "http://localhost:8000/api/dashboard/stats");
}

#[test]
fn log_level_parsing() {
    assert_eq!(parse_log_level(None).unwrap(), tracing::Level::WARN);
    assert_eq!(parse_log_level(Some("DEBUG")).unwrap(), tracing::Level::DEBUG);
    assert!(parse_log_level(Some("loud")).is_err());
}
