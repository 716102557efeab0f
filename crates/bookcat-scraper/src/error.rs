use thiserror::Error;

use crate::types::Field;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("HTTP error fetching {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("rate limited by {url} (retry after {retry_after_secs}s)")]
    RateLimited { url: String, retry_after_secs: u64 },

    #[error("page not found: {url}")]
    NotFound { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("missing {field} markup on {url}")]
    MissingMarkup { url: String, field: Field },

    #[error("cannot normalize {field} value \"{raw}\" on {url}: {reason}")]
    Normalization {
        url: String,
        field: Field,
        raw: String,
        reason: String,
    },

    #[error("invalid URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("pagination limit reached for {base_url}: exceeded {max_pages} pages")]
    PaginationLimit { base_url: String, max_pages: usize },

    #[error("pagination cycle detected: {url} was already visited")]
    PaginationCycle { url: String },
}

impl ScraperError {
    /// The page or resource URL the failure is attributed to, if any.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::ClientBuild(_) => None,
            Self::Http { url, .. }
            | Self::RateLimited { url, .. }
            | Self::NotFound { url }
            | Self::UnexpectedStatus { url, .. }
            | Self::MissingMarkup { url, .. }
            | Self::Normalization { url, .. }
            | Self::InvalidUrl { url, .. }
            | Self::PaginationCycle { url } => Some(url),
            Self::PaginationLimit { base_url, .. } => Some(base_url),
        }
    }

    /// The record field a parse or normalization failure concerns.
    #[must_use]
    pub fn field(&self) -> Option<Field> {
        match self {
            Self::MissingMarkup { field, .. } | Self::Normalization { field, .. } => Some(*field),
            _ => None,
        }
    }

    /// Returns `true` for transport-level failures (network, timeout,
    /// non-success status) as opposed to markup problems.
    #[must_use]
    pub fn is_fetch_error(&self) -> bool {
        matches!(
            self,
            Self::Http { .. }
                | Self::RateLimited { .. }
                | Self::NotFound { .. }
                | Self::UnexpectedStatus { .. }
        )
    }
}
