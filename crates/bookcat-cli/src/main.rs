mod crawl;
mod query;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::crawl::CrawlArgs;
use crate::query::QueryCommands;

#[derive(Debug, Parser)]
#[command(name = "bookcat")]
#[command(about = "Crawl a paginated book catalog and query the resulting dataset")]
struct Cli {
    /// Record batch to read or write (defaults to BOOKCAT_OUTPUT_PATH)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Discover every item, extract each detail page, and write the batch
    Crawl(CrawlArgs),
    #[command(flatten)]
    Query(QueryCommands),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = bookcat_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    tracing::debug!(env = %config.env, "configuration loaded");

    let data_path = cli.data.unwrap_or_else(|| config.output_path.clone());

    match cli.command {
        Commands::Crawl(args) => crawl::run_crawl(&config, &data_path, &args).await,
        Commands::Query(command) => query::run_query(&data_path, command),
    }
}
