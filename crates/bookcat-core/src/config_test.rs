use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

fn env_with<'a>(var: &'a str, value: &'a str) -> HashMap<&'a str, &'a str> {
    let mut m = HashMap::new();
    m.insert(var, value);
    m
}

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_test() {
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("unknown").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "BOOKCAT_ENV"));
}

#[test]
fn build_app_config_uses_defaults_when_env_is_empty() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.base_url.as_str(), "https://books.toscrape.com/");
    assert_eq!(cfg.output_path.to_str(), Some("./data/books.json"));
    assert_eq!(cfg.scraper_request_timeout_secs, 30);
    assert_eq!(cfg.scraper_user_agent, "bookcat/0.1 (catalog-extraction)");
    assert_eq!(cfg.scraper_max_concurrent_items, 1);
    assert_eq!(cfg.scraper_inter_request_delay_ms, 250);
    assert_eq!(cfg.scraper_max_retries, 0);
    assert_eq!(cfg.scraper_retry_backoff_base_secs, 5);
    assert_eq!(cfg.item_failure_policy, ItemFailurePolicy::Abort);
}

#[test]
fn base_url_gets_trailing_slash() {
    let map = env_with("BOOKCAT_BASE_URL", "https://mirror.example.test/books");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.base_url.as_str(), "https://mirror.example.test/books/");
}

#[test]
fn base_url_with_trailing_slash_is_unchanged() {
    let map = env_with("BOOKCAT_BASE_URL", "https://mirror.example.test/books/");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.base_url.as_str(), "https://mirror.example.test/books/");
}

#[test]
fn with_trailing_slash_appends_once() {
    let bare = url::Url::parse("https://example.test/books").unwrap();
    let once = with_trailing_slash(&bare);
    assert_eq!(once.as_str(), "https://example.test/books/");
    assert_eq!(with_trailing_slash(&once), once);
}

#[test]
fn base_url_rejects_garbage() {
    let map = env_with("BOOKCAT_BASE_URL", "not a url");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BOOKCAT_BASE_URL"),
        "expected InvalidEnvVar(BOOKCAT_BASE_URL), got: {result:?}"
    );
}

#[test]
fn base_url_rejects_non_http_scheme() {
    let map = env_with("BOOKCAT_BASE_URL", "ftp://books.example.test/");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BOOKCAT_BASE_URL"),
        "expected InvalidEnvVar(BOOKCAT_BASE_URL), got: {result:?}"
    );
}

#[test]
fn scraper_request_timeout_secs_override() {
    let map = env_with("BOOKCAT_SCRAPER_REQUEST_TIMEOUT_SECS", "60");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.scraper_request_timeout_secs, 60);
}

#[test]
fn scraper_request_timeout_secs_invalid() {
    let map = env_with("BOOKCAT_SCRAPER_REQUEST_TIMEOUT_SECS", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BOOKCAT_SCRAPER_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(BOOKCAT_SCRAPER_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn scraper_max_concurrent_items_override() {
    let map = env_with("BOOKCAT_SCRAPER_MAX_CONCURRENT_ITEMS", "8");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.scraper_max_concurrent_items, 8);
}

#[test]
fn scraper_max_concurrent_items_rejects_zero() {
    let map = env_with("BOOKCAT_SCRAPER_MAX_CONCURRENT_ITEMS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BOOKCAT_SCRAPER_MAX_CONCURRENT_ITEMS"),
        "expected InvalidEnvVar(BOOKCAT_SCRAPER_MAX_CONCURRENT_ITEMS), got: {result:?}"
    );
}

#[test]
fn scraper_max_retries_invalid() {
    let map = env_with("BOOKCAT_SCRAPER_MAX_RETRIES", "-1");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BOOKCAT_SCRAPER_MAX_RETRIES"),
        "expected InvalidEnvVar(BOOKCAT_SCRAPER_MAX_RETRIES), got: {result:?}"
    );
}

#[test]
fn item_failure_policy_skip_is_case_insensitive() {
    let map = env_with("BOOKCAT_ITEM_FAILURE_POLICY", "SKIP");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.item_failure_policy, ItemFailurePolicy::Skip);
}

#[test]
fn item_failure_policy_unknown_fails() {
    let map = env_with("BOOKCAT_ITEM_FAILURE_POLICY", "collect");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BOOKCAT_ITEM_FAILURE_POLICY"),
        "expected InvalidEnvVar(BOOKCAT_ITEM_FAILURE_POLICY), got: {result:?}"
    );
}

#[test]
fn item_failure_policy_display_matches_parse() {
    for policy in [ItemFailurePolicy::Abort, ItemFailurePolicy::Skip] {
        assert_eq!(policy.to_string().parse::<ItemFailurePolicy>(), Ok(policy));
    }
}
