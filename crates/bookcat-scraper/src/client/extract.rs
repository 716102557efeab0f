//! Single-item extraction for `CatalogClient`.

use bookcat_core::ItemRecord;

use crate::error::ScraperError;
use crate::parse::parse_item_page;

use super::CatalogClient;

impl CatalogClient {
    /// Fetches one item detail page and parses it into an [`ItemRecord`].
    ///
    /// Exactly one request per call and no retries; `item_url` is stored
    /// verbatim as the record's `source_url`.
    ///
    /// # Errors
    ///
    /// Propagates fetch errors from [`Self::fetch_html`] and parse or
    /// normalization errors from [`parse_item_page`]; all carry `item_url`.
    pub async fn extract(&self, item_url: &str) -> Result<ItemRecord, ScraperError> {
        let html = self.fetch_html(item_url).await?;
        parse_item_page(&html, item_url, &self.base_url)
    }
}
