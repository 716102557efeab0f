use std::path::PathBuf;

use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid record JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("dataset not loaded from {}: {reason}", .path.display())]
    NotLoaded { path: PathBuf, reason: String },

    #[error("no data available: the dataset contains no records")]
    NoData,

    #[error("invalid record {source_url}: {reason}")]
    InvalidRecord { source_url: String, reason: String },

    #[error("duplicate record for source URL {source_url}")]
    DuplicateSource { source_url: String },

    #[error("invalid price range: min {min} is greater than max {max}")]
    InvalidRange { min: Decimal, max: Decimal },
}
