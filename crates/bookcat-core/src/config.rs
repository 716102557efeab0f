use crate::app_config::{AppConfig, Environment, ItemFailurePolicy};
use crate::ConfigError;

pub const DEFAULT_BASE_URL: &str = "https://books.toscrape.com/";

/// Loads `.env` (if present) and then builds the configuration from the
/// process environment.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Like [`load_app_config`] but reads only the current process environment;
/// no `.env` file is consulted.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Parses and validates every `BOOKCAT_*` variable through `lookup`.
/// Unset variables take their defaults; set but unparsable ones are errors.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("BOOKCAT_ENV", "development"))?;
    let log_level = or_default("BOOKCAT_LOG_LEVEL", "info");
    let base_url = parse_base_url(&or_default("BOOKCAT_BASE_URL", DEFAULT_BASE_URL))?;
    let output_path = PathBuf::from(or_default("BOOKCAT_OUTPUT_PATH", "./data/books.json"));

    let scraper_request_timeout_secs = parse_u64("BOOKCAT_SCRAPER_REQUEST_TIMEOUT_SECS", "30")?;
    let scraper_user_agent = or_default(
        "BOOKCAT_SCRAPER_USER_AGENT",
        "bookcat/0.1 (catalog-extraction)",
    );
    let scraper_max_concurrent_items = parse_usize("BOOKCAT_SCRAPER_MAX_CONCURRENT_ITEMS", "1")?;
    if scraper_max_concurrent_items == 0 {
        return Err(invalid(
            "BOOKCAT_SCRAPER_MAX_CONCURRENT_ITEMS",
            "must be at least 1".to_string(),
        ));
    }
    let scraper_inter_request_delay_ms =
        parse_u64("BOOKCAT_SCRAPER_INTER_REQUEST_DELAY_MS", "250")?;
    let scraper_max_retries = parse_u32("BOOKCAT_SCRAPER_MAX_RETRIES", "0")?;
    let scraper_retry_backoff_base_secs =
        parse_u64("BOOKCAT_SCRAPER_RETRY_BACKOFF_BASE_SECS", "5")?;

    let item_failure_policy = or_default("BOOKCAT_ITEM_FAILURE_POLICY", "abort")
        .parse::<ItemFailurePolicy>()
        .map_err(|reason| invalid("BOOKCAT_ITEM_FAILURE_POLICY", reason))?;

    Ok(AppConfig {
        env,
        log_level,
        base_url,
        output_path,
        scraper_request_timeout_secs,
        scraper_user_agent,
        scraper_max_concurrent_items,
        scraper_inter_request_delay_ms,
        scraper_max_retries,
        scraper_retry_backoff_base_secs,
        item_failure_policy,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for anything other than
/// `development`, `test`, or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "BOOKCAT_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

/// Parse the catalog root. A trailing slash is appended when missing so that
/// relative joins land beneath the root instead of replacing its last segment.
fn parse_base_url(raw: &str) -> Result<url::Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnvVar {
        var: "BOOKCAT_BASE_URL".to_string(),
        reason,
    };

    let url = url::Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme \"{}\"", url.scheme())));
    }
    Ok(with_trailing_slash(&url))
}

/// Ensures a URL path ends in `/` so that relative joins land beneath it.
#[must_use]
pub fn with_trailing_slash(url: &url::Url) -> url::Url {
    let mut url = url.clone();
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
