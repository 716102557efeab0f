//! Read-only query layer over a crawled record batch.
//!
//! The batch is loaded once into an immutable [`Dataset`] and held by a
//! [`DatasetStore`] that makes the "nothing loaded" and "loaded but empty"
//! states explicit instead of leaving every query to null-check.

pub mod dataset;
pub mod error;
pub mod query;
pub mod store;

pub use dataset::{Dataset, DatasetStore};
pub use error::DatasetError;
pub use query::{
    BookFilter, CategoryStats, HealthStatus, OverviewStats, PriceRangeFilter,
    UNKNOWN_RATING_KEY,
};
pub use store::{read_records, write_records};
