//! Crawl driver: discovery once, then one extraction per discovered URL.
//!
//! Extraction runs through a bounded pool built on
//! [`futures::StreamExt::buffered`], which yields results in input order,
//! so the emitted records always follow discovery order whatever the
//! concurrency. Discovery itself is strictly sequential.

use bookcat_core::{AppConfig, ItemFailurePolicy, ItemRecord};
use futures::stream::{self, StreamExt};
use thiserror::Error;

use crate::client::CatalogClient;
use crate::error::ScraperError;
use crate::rate_limit::retry_with_backoff;
use crate::types::Field;

/// Driver settings; see [`CrawlOptions::from_app_config`].
#[derive(Debug, Clone)]
pub struct CrawlOptions {
    /// Upper bound on in-flight item fetches. Values below 1 are treated as 1.
    pub max_concurrent_items: usize,
    /// Pause between listing pages.
    pub inter_request_delay_ms: u64,
    /// Extra attempts for an item after a transient fetch failure.
    pub max_retries: u32,
    pub retry_backoff_base_secs: u64,
    pub failure_policy: ItemFailurePolicy,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            max_concurrent_items: 1,
            inter_request_delay_ms: 0,
            max_retries: 0,
            retry_backoff_base_secs: 0,
            failure_policy: ItemFailurePolicy::Abort,
        }
    }
}

impl CrawlOptions {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            max_concurrent_items: config.scraper_max_concurrent_items,
            inter_request_delay_ms: config.scraper_inter_request_delay_ms,
            max_retries: config.scraper_max_retries,
            retry_backoff_base_secs: config.scraper_retry_backoff_base_secs,
            failure_policy: config.item_failure_policy,
        }
    }
}

/// An item that could not be extracted under [`ItemFailurePolicy::Skip`].
#[derive(Debug)]
pub struct ItemFailure {
    /// Position of the URL in discovery order.
    pub index: usize,
    pub url: String,
    pub error: ScraperError,
}

/// Result of a completed crawl.
#[derive(Debug)]
pub struct CrawlReport {
    /// Number of item URLs discovery produced.
    pub discovered: usize,
    /// Extracted records, in discovery order.
    pub records: Vec<ItemRecord>,
    /// Skipped items, in discovery order. Always empty under
    /// [`ItemFailurePolicy::Abort`].
    pub failures: Vec<ItemFailure>,
}

impl CrawlReport {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty() && self.records.len() == self.discovered
    }
}

#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("catalog discovery failed: {0}")]
    Discovery(#[source] ScraperError),

    #[error("item {index} ({url}) failed to extract: {source}")]
    Item {
        index: usize,
        url: String,
        #[source]
        source: ScraperError,
    },
}

/// Runs discovery, then extracts every discovered item.
///
/// # Errors
///
/// Returns [`CrawlError::Discovery`] if any listing page fails; no records
/// are extracted in that case. Item failures are handled per
/// `options.failure_policy` (see [`extract_all`]).
pub async fn crawl(
    client: &CatalogClient,
    options: &CrawlOptions,
) -> Result<CrawlReport, CrawlError> {
    let urls = client
        .discover(options.inter_request_delay_ms)
        .await
        .map_err(CrawlError::Discovery)?;

    let (records, failures) = extract_all(client, &urls, options).await?;

    tracing::info!(
        discovered = urls.len(),
        extracted = records.len(),
        skipped = failures.len(),
        "crawl complete"
    );

    Ok(CrawlReport {
        discovered: urls.len(),
        records,
        failures,
    })
}

/// Extracts each URL with at most `options.max_concurrent_items` in flight,
/// returning records in the same order as `urls`.
///
/// Transient fetch failures are retried per `options.max_retries`. Under
/// [`ItemFailurePolicy::Skip`] every failure is logged and returned alongside
/// the records; sibling extractions are unaffected.
///
/// # Errors
///
/// Under [`ItemFailurePolicy::Abort`], returns [`CrawlError::Item`] for the
/// first failing URL in input order. In-flight siblings are dropped.
pub async fn extract_all(
    client: &CatalogClient,
    urls: &[String],
    options: &CrawlOptions,
) -> Result<(Vec<ItemRecord>, Vec<ItemFailure>), CrawlError> {
    let total = urls.len();
    let max_retries = options.max_retries;
    let backoff_base_secs = options.retry_backoff_base_secs;

    let mut outcomes = std::pin::pin!(stream::iter(urls.iter().enumerate())
        .map(|(index, url)| async move {
            let result =
                retry_with_backoff(max_retries, backoff_base_secs, move || client.extract(url)).await;
            (index, url, result)
        })
        .buffered(options.max_concurrent_items.max(1)));

    let mut records = Vec::with_capacity(total);
    let mut failures = Vec::new();

    while let Some((index, url, result)) = outcomes.next().await {
        match result {
            Ok(record) => {
                tracing::debug!(item = index + 1, total, url = %url, "item extracted");
                records.push(record);
            }
            Err(error) => match options.failure_policy {
                ItemFailurePolicy::Abort => {
                    return Err(CrawlError::Item {
                        index,
                        url: url.clone(),
                        source: error,
                    });
                }
                ItemFailurePolicy::Skip => {
                    tracing::warn!(
                        item = index + 1,
                        total,
                        url = %url,
                        field = error.field().map(Field::as_str),
                        fetch_error = error.is_fetch_error(),
                        error = %error,
                        "extraction failed; skipping item"
                    );
                    failures.push(ItemFailure {
                        index,
                        url: url.clone(),
                        error,
                    });
                }
            },
        }
    }

    Ok((records, failures))
}
