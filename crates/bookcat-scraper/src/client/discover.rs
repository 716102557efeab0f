//! Listing traversal for `CatalogClient`.

use std::collections::HashSet;
use std::time::Duration;

use url::Url;

use crate::error::ScraperError;
use crate::pagination::parse_listing_page;

use super::origin::first_page_url;
use super::CatalogClient;
use super::MAX_PAGES;

impl CatalogClient {
    /// Walks every listing page from the first one, following "next" links,
    /// and returns all item detail URLs in page order then in-page order.
    ///
    /// `inter_request_delay_ms` is the delay in milliseconds between page
    /// requests (applied before every page except the first).
    ///
    /// **All-or-nothing semantics**: on any page failure the URLs collected so
    /// far are discarded and the error is returned. A silently truncated
    /// listing would make every downstream count and average wrong.
    ///
    /// Traversal is not resumable; a new call always starts from page 1.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Self::fetch_html`] or
    /// [`parse_listing_page`], each carrying the failing page URL.
    /// Returns [`ScraperError::PaginationLimit`] past [`MAX_PAGES`] pages and
    /// [`ScraperError::PaginationCycle`] if a "next" link points at a page
    /// that was already visited.
    pub async fn discover(&self, inter_request_delay_ms: u64) -> Result<Vec<String>, ScraperError> {
        let mut item_urls: Vec<String> = Vec::new();
        let mut visited: HashSet<Url> = HashSet::new();
        let mut cursor: Option<Url> = Some(first_page_url(&self.catalog_root)?);
        let mut page_count = 0usize;

        while let Some(page_url) = cursor.take() {
            page_count += 1;
            if page_count > MAX_PAGES {
                return Err(ScraperError::PaginationLimit {
                    base_url: self.base_url.to_string(),
                    max_pages: MAX_PAGES,
                });
            }

            if page_count > 1 && inter_request_delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(inter_request_delay_ms)).await;
            }

            let html = self.fetch_html(page_url.as_str()).await?;
            let page = parse_listing_page(&html, page_url.as_str(), &self.catalog_root)?;

            tracing::debug!(
                page = page_count,
                url = %page_url,
                items = page.item_urls.len(),
                has_next = page.next_page.is_some(),
                "listing page parsed"
            );

            item_urls.extend(page.item_urls);
            visited.insert(page_url);

            if let Some(next) = page.next_page {
                if visited.contains(&next) {
                    return Err(ScraperError::PaginationCycle {
                        url: next.to_string(),
                    });
                }
                cursor = Some(next);
            }
        }

        tracing::info!(
            pages = page_count,
            items = item_urls.len(),
            base_url = %self.base_url,
            "catalog discovery complete"
        );

        Ok(item_urls)
    }
}
