//! `crawl` command: run the extraction pipeline and persist the batch.

use std::path::Path;

use anyhow::Context;
use bookcat_core::{AppConfig, ItemFailurePolicy};
use bookcat_scraper::{CatalogClient, CrawlOptions};
use clap::Args;
use url::Url;

#[derive(Debug, Args)]
pub struct CrawlArgs {
    /// Catalog root URL (overrides BOOKCAT_BASE_URL)
    #[arg(long)]
    pub base_url: Option<Url>,

    /// Maximum detail pages fetched at once (overrides BOOKCAT_SCRAPER_MAX_CONCURRENT_ITEMS)
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
    pub max_concurrent: Option<u16>,

    /// What to do when one item fails: abort or skip (overrides BOOKCAT_ITEM_FAILURE_POLICY)
    #[arg(long)]
    pub on_item_error: Option<ItemFailurePolicy>,

    /// Only walk the listing pages and report how many items were found
    #[arg(long)]
    pub dry_run: bool,
}

/// Runs discovery and extraction, then writes the ordered batch to `output`.
///
/// Nothing is written unless the whole run succeeds under the configured
/// failure policy; a failed run leaves any previous batch untouched.
///
/// # Errors
///
/// Returns an error if the client cannot be built, discovery fails, an item
/// fails under the `abort` policy, or the batch cannot be written.
pub(crate) async fn run_crawl(
    config: &AppConfig,
    output: &Path,
    args: &CrawlArgs,
) -> anyhow::Result<()> {
    let base_url = args.base_url.as_ref().unwrap_or(&config.base_url);
    let client = CatalogClient::new(
        base_url,
        config.scraper_request_timeout_secs,
        &config.scraper_user_agent,
    )
    .context("failed to build catalog client")?;

    let mut options = CrawlOptions::from_app_config(config);
    if let Some(n) = args.max_concurrent {
        options.max_concurrent_items = usize::from(n);
    }
    if let Some(policy) = args.on_item_error {
        options.failure_policy = policy;
    }

    if args.dry_run {
        let urls = client
            .discover(options.inter_request_delay_ms)
            .await
            .with_context(|| format!("discovery failed for {base_url}"))?;
        println!("dry-run: discovered {} items under {base_url}", urls.len());
        return Ok(());
    }

    tracing::info!(
        base_url = %client.base_url(),
        max_concurrent_items = options.max_concurrent_items,
        failure_policy = %options.failure_policy,
        "starting crawl"
    );

    let report = bookcat_scraper::crawl(&client, &options)
        .await
        .with_context(|| format!("crawl of {base_url} failed"))?;

    bookcat_dataset::write_records(output, &report.records)
        .with_context(|| format!("failed to write {}", output.display()))?;

    for failure in &report.failures {
        eprintln!(
            "skipped: item {} {}: {}",
            failure.index + 1,
            failure.url,
            failure.error
        );
    }

    println!(
        "crawl complete: {} discovered, {} written to {}, {} skipped",
        report.discovered,
        report.records.len(),
        output.display(),
        report.failures.len()
    );
    Ok(())
}
