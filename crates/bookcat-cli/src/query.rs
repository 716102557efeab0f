//! Read-only query commands over a written record batch.
//!
//! Each command loads the batch once into a `DatasetStore` and prints its
//! result as pretty JSON on stdout. An absent or empty batch is reported as
//! an error, never as an empty result.

use std::path::Path;

use bookcat_dataset::{BookFilter, DatasetStore, PriceRangeFilter};
use clap::Subcommand;
use rust_decimal::Decimal;
use serde::Serialize;

/// Sub-commands that query an existing batch.
#[derive(Debug, Subcommand)]
pub enum QueryCommands {
    /// Check that the batch is present and holds records
    Health,
    /// List records, optionally filtered
    Books {
        /// Exact category name (e.g., "Poetry")
        #[arg(long)]
        category: Option<String>,
        /// Exact star rating (1-5)
        #[arg(long)]
        rating: Option<u8>,
        /// Inclusive price ceiling
        #[arg(long)]
        max_price: Option<Decimal>,
        /// Maximum number of records to show
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Total records, average price, and rating distribution
    Overview,
    /// Record count and price statistics per category
    Categories,
    /// Highest rated records, cheapest first among ties
    TopRated {
        /// Maximum number of records to show
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Records priced within an inclusive range, cheapest first
    PriceRange {
        #[arg(long)]
        min: Decimal,
        #[arg(long)]
        max: Decimal,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        rating: Option<u8>,
        /// Maximum number of records to show
        #[arg(long)]
        limit: Option<usize>,
    },
}

/// Loads the batch at `data_path` and runs one query against it.
///
/// # Errors
///
/// Returns an error if the batch is missing, unreadable, or empty, if the
/// query parameters are invalid, or if the result cannot be printed.
pub(crate) fn run_query(data_path: &Path, command: QueryCommands) -> anyhow::Result<()> {
    let store = DatasetStore::load(data_path);

    match command {
        QueryCommands::Health => print_json(&store.health()?),
        QueryCommands::Books {
            category,
            rating,
            max_price,
            limit,
        } => {
            let filter = BookFilter {
                category,
                rating,
                max_price,
                limit,
            };
            print_json(&store.require()?.books(&filter))
        }
        QueryCommands::Overview => print_json(&store.require()?.overview()),
        QueryCommands::Categories => print_json(&store.require()?.categories()),
        QueryCommands::TopRated { limit } => print_json(&store.require()?.top_rated(limit)),
        QueryCommands::PriceRange {
            min,
            max,
            category,
            rating,
            limit,
        } => {
            let filter = PriceRangeFilter {
                min,
                max,
                category,
                rating,
                limit,
            };
            print_json(&store.require()?.price_range(&filter)?)
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
