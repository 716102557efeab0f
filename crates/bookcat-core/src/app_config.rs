use std::path::PathBuf;

use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// What the crawl driver does when a single item fails to extract.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ItemFailurePolicy {
    /// The first failed item (in discovery order) fails the whole run.
    #[default]
    Abort,
    /// Failed items are logged with URL and reason, reported, and left out
    /// of the output batch.
    Skip,
}

impl std::fmt::Display for ItemFailurePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemFailurePolicy::Abort => write!(f, "abort"),
            ItemFailurePolicy::Skip => write!(f, "skip"),
        }
    }
}

impl std::str::FromStr for ItemFailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "abort" => Ok(Self::Abort),
            "skip" => Ok(Self::Skip),
            other => Err(format!(
                "unknown item failure policy \"{other}\" (expected \"abort\" or \"skip\")"
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Catalog root; listing and detail URLs are resolved beneath it.
    pub base_url: Url,
    pub output_path: PathBuf,
    pub scraper_request_timeout_secs: u64,
    pub scraper_user_agent: String,
    pub scraper_max_concurrent_items: usize,
    pub scraper_inter_request_delay_ms: u64,
    pub scraper_max_retries: u32,
    pub scraper_retry_backoff_base_secs: u64,
    pub item_failure_policy: ItemFailurePolicy,
}
