//! Query parameters and result shapes for [`crate::Dataset`].

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BOOKS_LIMIT: usize = 20;
pub const DEFAULT_TOP_RATED_LIMIT: usize = 20;
pub const DEFAULT_PRICE_RANGE_LIMIT: usize = 50;

/// Histogram key used for records whose rating is unknown.
pub const UNKNOWN_RATING_KEY: i16 = -1;

/// Filters for [`crate::Dataset::books`]. Every filter is optional; absent
/// filters match everything.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookFilter {
    /// Exact category label.
    pub category: Option<String>,
    /// Exact star rating.
    pub rating: Option<u8>,
    /// Inclusive price ceiling.
    pub max_price: Option<Decimal>,
    /// Result cap; defaults to [`DEFAULT_BOOKS_LIMIT`].
    pub limit: Option<usize>,
}

/// Filters for [`crate::Dataset::price_range`].
#[derive(Debug, Clone, Deserialize)]
pub struct PriceRangeFilter {
    /// Inclusive lower bound.
    pub min: Decimal,
    /// Inclusive upper bound.
    pub max: Decimal,
    pub category: Option<String>,
    pub rating: Option<u8>,
    /// Result cap; defaults to [`DEFAULT_PRICE_RANGE_LIMIT`].
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverviewStats {
    pub total_books: usize,
    /// Mean price rounded to two decimal places.
    pub avg_price: Decimal,
    /// Record count per star rating, ascending; unknown ratings are counted
    /// under [`UNKNOWN_RATING_KEY`].
    pub rating_distribution: BTreeMap<i16, usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryStats {
    pub category: String,
    pub total_books: usize,
    pub avg_price: Decimal,
    pub min_price: Decimal,
    pub max_price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub total_books: usize,
}

pub(crate) fn matches_optional<T: PartialEq + ?Sized>(wanted: Option<&T>, actual: &T) -> bool {
    wanted.is_none_or(|w| w == actual)
}
