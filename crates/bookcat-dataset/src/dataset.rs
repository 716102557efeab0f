//! The immutable in-memory table and the store that owns it.

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use bookcat_core::ItemRecord;
use rust_decimal::Decimal;

use crate::error::DatasetError;
use crate::query::{
    matches_optional, BookFilter, CategoryStats, HealthStatus, OverviewStats, PriceRangeFilter,
    DEFAULT_BOOKS_LIMIT, DEFAULT_PRICE_RANGE_LIMIT, DEFAULT_TOP_RATED_LIMIT, UNKNOWN_RATING_KEY,
};
use crate::store::read_records;

/// A validated, non-empty, immutable set of records in crawl order.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<ItemRecord>,
}

impl Dataset {
    /// Wraps a crawled batch.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::NoData`] for an empty batch,
    /// [`DatasetError::InvalidRecord`] for the first record breaking an
    /// [`ItemRecord::validate`] invariant, and
    /// [`DatasetError::DuplicateSource`] if two records share a `source_url`.
    pub fn new(records: Vec<ItemRecord>) -> Result<Self, DatasetError> {
        if records.is_empty() {
            return Err(DatasetError::NoData);
        }

        for record in &records {
            record
                .validate()
                .map_err(|reason| DatasetError::InvalidRecord {
                    source_url: record.source_url.clone(),
                    reason,
                })?;
        }

        let mut seen: HashSet<&str> = HashSet::with_capacity(records.len());
        if let Some(dup) = records.iter().find(|r| !seen.insert(r.source_url.as_str())) {
            return Err(DatasetError::DuplicateSource {
                source_url: dup.source_url.clone(),
            });
        }

        Ok(Self { records })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always `false`; an empty batch never becomes a `Dataset`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records matching every present filter, in crawl order, capped at the
    /// filter's limit.
    #[must_use]
    pub fn books(&self, filter: &BookFilter) -> Vec<&ItemRecord> {
        self.records
            .iter()
            .filter(|r| matches_optional(filter.category.as_deref(), r.category.as_str()))
            .filter(|r| filter.rating.is_none() || r.rating == filter.rating)
            .filter(|r| filter.max_price.is_none_or(|max| r.price <= max))
            .take(filter.limit.unwrap_or(DEFAULT_BOOKS_LIMIT))
            .collect()
    }

    /// Collection-wide totals: record count, mean price, and rating histogram.
    #[must_use]
    pub fn overview(&self) -> OverviewStats {
        let mut rating_distribution: BTreeMap<i16, usize> = BTreeMap::new();
        for record in &self.records {
            let key = record.rating.map_or(UNKNOWN_RATING_KEY, i16::from);
            *rating_distribution.entry(key).or_default() += 1;
        }

        OverviewStats {
            total_books: self.records.len(),
            avg_price: mean(self.records.iter().map(|r| r.price)),
            rating_distribution,
        }
    }

    /// Per-category count and price statistics, largest category first;
    /// equal counts are ordered by category name.
    #[must_use]
    pub fn categories(&self) -> Vec<CategoryStats> {
        let mut by_category: BTreeMap<&str, Vec<Decimal>> = BTreeMap::new();
        for record in &self.records {
            by_category
                .entry(record.category.as_str())
                .or_default()
                .push(record.price);
        }

        let mut stats: Vec<CategoryStats> = by_category
            .into_iter()
            .filter_map(|(category, prices)| {
                let min_price = prices.iter().min().copied()?;
                let max_price = prices.iter().max().copied()?;
                Some(CategoryStats {
                    category: category.to_owned(),
                    total_books: prices.len(),
                    avg_price: mean(prices.iter().copied()),
                    min_price,
                    max_price,
                })
            })
            .collect();

        // Stable: ties keep the BTreeMap's name order.
        stats.sort_by(|a, b| b.total_books.cmp(&a.total_books));
        stats
    }

    /// Highest rated first, cheaper first among equal ratings; unknown
    /// ratings sort after every known one.
    #[must_use]
    pub fn top_rated(&self, limit: Option<usize>) -> Vec<&ItemRecord> {
        let mut ranked: Vec<&ItemRecord> = self.records.iter().collect();
        ranked.sort_by(|a, b| b.rating.cmp(&a.rating).then(a.price.cmp(&b.price)));
        ranked.truncate(limit.unwrap_or(DEFAULT_TOP_RATED_LIMIT));
        ranked
    }

    /// Records priced within `[min, max]` (inclusive), optionally narrowed by
    /// category and rating, cheapest first.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::InvalidRange`] when `min > max`.
    pub fn price_range(&self, filter: &PriceRangeFilter) -> Result<Vec<&ItemRecord>, DatasetError> {
        if filter.min > filter.max {
            return Err(DatasetError::InvalidRange {
                min: filter.min,
                max: filter.max,
            });
        }

        let mut matched: Vec<&ItemRecord> = self
            .records
            .iter()
            .filter(|r| r.price >= filter.min && r.price <= filter.max)
            .filter(|r| matches_optional(filter.category.as_deref(), r.category.as_str()))
            .filter(|r| filter.rating.is_none() || r.rating == filter.rating)
            .collect();
        matched.sort_by(|a, b| a.price.cmp(&b.price));
        matched.truncate(filter.limit.unwrap_or(DEFAULT_PRICE_RANGE_LIMIT));
        Ok(matched)
    }
}

/// Arithmetic mean rounded to two decimal places. Callers never pass an
/// empty iterator; zero is returned if they do.
fn mean(prices: impl Iterator<Item = Decimal>) -> Decimal {
    let (sum, count) = prices.fold((Decimal::ZERO, 0usize), |(sum, n), p| (sum + p, n + 1));
    if count == 0 {
        return Decimal::ZERO;
    }
    (sum / Decimal::from(count)).round_dp(2)
}

/// Owner of the dataset for the lifetime of the query process.
///
/// Constructed once at startup and passed by reference to every query.
#[derive(Debug)]
pub enum DatasetStore {
    Loaded(Dataset),
    /// The batch file was read but held no records.
    Empty { path: PathBuf },
    /// The batch file could not be read or validated.
    Unavailable { path: PathBuf, reason: String },
}

impl DatasetStore {
    /// Loads the batch at `path`. Never fails; problems are captured in the
    /// returned state and surfaced by [`Self::require`].
    #[must_use]
    pub fn load(path: &Path) -> Self {
        let loaded = read_records(path).and_then(Dataset::new);
        match loaded {
            Ok(dataset) => {
                tracing::info!(path = %path.display(), records = dataset.len(), "dataset loaded");
                Self::Loaded(dataset)
            }
            Err(DatasetError::NoData) => {
                tracing::warn!(path = %path.display(), "dataset file holds no records");
                Self::Empty {
                    path: path.to_path_buf(),
                }
            }
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "failed to load dataset");
                Self::Unavailable {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Returns the loaded dataset.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::NoData`] if the batch was empty and
    /// [`DatasetError::NotLoaded`] if it could not be loaded at all.
    pub fn require(&self) -> Result<&Dataset, DatasetError> {
        match self {
            Self::Loaded(dataset) => Ok(dataset),
            Self::Empty { .. } => Err(DatasetError::NoData),
            Self::Unavailable { path, reason } => Err(DatasetError::NotLoaded {
                path: path.clone(),
                reason: reason.clone(),
            }),
        }
    }

    /// Liveness check for the query layer.
    ///
    /// # Errors
    ///
    /// Same as [`Self::require`].
    pub fn health(&self) -> Result<HealthStatus, DatasetError> {
        let dataset = self.require()?;
        Ok(HealthStatus {
            status: "ok",
            total_books: dataset.len(),
        })
    }
}

#[cfg(test)]
#[path = "dataset_test.rs"]
mod tests;
