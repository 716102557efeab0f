pub mod client;
pub mod error;
pub mod normalize;
pub mod pagination;
pub mod parse;
pub mod pipeline;
mod rate_limit;
pub mod types;

pub use client::CatalogClient;
pub use error::ScraperError;
pub use pipeline::{crawl, extract_all, CrawlError, CrawlOptions, CrawlReport, ItemFailure};
pub use types::{Field, ListingPage};
