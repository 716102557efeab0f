//! Fixed site layout: where the catalog lives beneath the root URL.

use url::Url;

use crate::error::ScraperError;

/// Directory, relative to the site root, holding listing and detail pages.
pub const CATALOG_DIR: &str = "catalogue/";
/// First listing page, relative to [`CATALOG_DIR`].
pub const FIRST_PAGE: &str = "page-1.html";

/// Returns the catalog directory beneath `base_url`.
///
/// Given `"https://books.toscrape.com/"`, returns
/// `"https://books.toscrape.com/catalogue/"`.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidUrl`] if `base_url` cannot be a base (e.g.
/// a `data:` URL).
pub fn catalog_root(base_url: &Url) -> Result<Url, ScraperError> {
    base_url
        .join(CATALOG_DIR)
        .map_err(|e| ScraperError::InvalidUrl {
            url: base_url.to_string(),
            reason: format!("cannot derive catalog directory: {e}"),
        })
}

/// Returns the URL traversal always starts from.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidUrl`] if the page URL cannot be joined.
pub fn first_page_url(catalog_root: &Url) -> Result<Url, ScraperError> {
    catalog_root
        .join(FIRST_PAGE)
        .map_err(|e| ScraperError::InvalidUrl {
            url: catalog_root.to_string(),
            reason: format!("cannot derive first listing page: {e}"),
        })
}

/// Extracts the hostname from a URL for use in log fields.
///
/// Falls back to the full URL string if parsing fails.
pub(super) fn extract_domain(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_owned))
        .unwrap_or_else(|| url.to_owned())
}
