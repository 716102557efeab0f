//! HTTP client for a static, "next"-link paginated catalog site.

mod discover;
mod extract;
mod origin;

use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::error::ScraperError;

pub use origin::{catalog_root, first_page_url};
#[cfg(test)]
use origin::extract_domain;

/// Maximum number of listing pages to walk before returning an error.
/// Prevents runaway traversal on a site whose "next" links never end.
pub(super) const MAX_PAGES: usize = 1000;

/// HTTP client bound to one catalog root.
///
/// Non-2xx responses are mapped to typed errors carrying the offending URL.
/// The client never retries on its own; retry policy belongs to the caller
/// (see [`crate::pipeline`]).
pub struct CatalogClient {
    pub(super) client: Client,
    /// Site root, always ending in `/`. Image paths resolve against this.
    pub(super) base_url: Url,
    /// Directory holding listing and detail pages, e.g. `{base}/catalogue/`.
    pub(super) catalog_root: Url,
}

impl CatalogClient {
    /// Creates a `CatalogClient` with configured per-request timeout and `User-Agent`.
    ///
    /// The timeout bounds each request end to end; expiry surfaces as
    /// [`ScraperError::Http`] for the URL being fetched.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::ClientBuild`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config), or
    /// [`ScraperError::InvalidUrl`] if the catalog directory cannot be derived
    /// from `base_url`.
    pub fn new(base_url: &Url, timeout_secs: u64, user_agent: &str) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()
            .map_err(ScraperError::ClientBuild)?;
        let base_url = bookcat_core::with_trailing_slash(base_url);
        let catalog_root = catalog_root(&base_url)?;
        Ok(Self {
            client,
            base_url,
            catalog_root,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetches a page and returns its body decoded with the charset the
    /// server declares in `Content-Type` (UTF-8 when none is declared).
    ///
    /// # Errors
    ///
    /// - [`ScraperError::RateLimited`]: HTTP 429.
    /// - [`ScraperError::NotFound`]: HTTP 404.
    /// - [`ScraperError::UnexpectedStatus`]: any other non-2xx status.
    /// - [`ScraperError::Http`]: network, TLS, timeout, or body decode failure.
    pub async fn fetch_html(&self, url: &str) -> Result<String, ScraperError> {
        let http_error = |source: reqwest::Error| ScraperError::Http {
            url: url.to_owned(),
            source,
        };

        let response = self
            .client
            .get(url)
            .header(
                reqwest::header::ACCEPT,
                "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8",
            )
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .send()
            .await
            .map_err(http_error)?;
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(60);
            tracing::warn!(
                url,
                domain = %origin::extract_domain(url),
                retry_after_secs,
                "catalog responded 429"
            );
            return Err(ScraperError::RateLimited {
                url: url.to_owned(),
                retry_after_secs,
            });
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ScraperError::NotFound {
                url: url.to_owned(),
            });
        }

        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        response.text().await.map_err(http_error)
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
