use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use agency_client::{BackendKind, DesignRushConfig, ScraperBackend};
use agency_core::models::{Query, QueryResult, ScrapeBatch};
use agency_core::ScrapeService;

mod csv_io;

use csv_io::{AGENCY_HEADERS, REVIEW_HEADERS, WriteMode};

#[derive(Parser)]
#[command(name = "agency", version, about = "Agency directory scraper")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape every (business, category) row of a CSV file
    Scrape {
        /// CSV file with a header row and `business,category` columns
        #[arg(short, long)]
        input: PathBuf,

        /// CSV file receiving one row per agency (appended if it has data)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// CSV file receiving one row per review (appended if it has data)
        #[arg(long)]
        reviews_output: Option<PathBuf>,

        #[command(flatten)]
        limits: Limits,
    },

    /// Scrape a single (business, category) pair
    Query {
        /// Business (sub-category) to search for
        #[arg(short, long)]
        business: String,

        /// Directory category containing the business
        #[arg(short, long)]
        category: String,

        #[command(flatten)]
        limits: Limits,
    },
}

#[derive(clap::Args)]
struct Limits {
    /// Listing pages to walk per query (default: 1)
    #[arg(long, env = "AGENCY_MAX_PAGES")]
    max_pages: Option<i64>,

    /// Agencies to open per listing page (default: 3)
    #[arg(long, env = "MAX_ITEMS_PER_KEYWORD")]
    max_items_per_page: Option<i64>,

    /// Scraper backend: placeholder or browser
    #[arg(long, env = "AGENCY_SCRAPER", default_value_t = BackendKind::Placeholder)]
    backend: BackendKind,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Setup tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("agency=info".parse()?))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Scrape {
            input,
            output,
            reviews_output,
            limits,
        } => {
            cmd_scrape(
                &input,
                output.as_deref(),
                reviews_output.as_deref(),
                &limits,
            )
            .await?;
        }
        Commands::Query {
            business,
            category,
            limits,
        } => {
            let results = run_batch(vec![Query::new(business, category)], &limits).await?;
            print_results(&results)?;
        }
    }

    Ok(())
}

async fn run_batch(queries: Vec<Query>, limits: &Limits) -> Result<Vec<QueryResult>> {
    let config = DesignRushConfig::from_env()?;
    let scraper = ScraperBackend::launch(limits.backend, &config)
        .await
        .context("Failed to start scraper backend")?;

    let mut batch = ScrapeBatch::new(queries);
    batch.max_pages = limits.max_pages;
    batch.max_items_per_page = limits.max_items_per_page;

    let results = ScrapeService::new(scraper).run(batch).await?;
    Ok(results)
}

fn print_results(results: &[QueryResult]) -> Result<()> {
    let output = serde_json::json!({ "results": results });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

async fn cmd_scrape(
    input: &Path,
    output: Option<&Path>,
    reviews_output: Option<&Path>,
    limits: &Limits,
) -> Result<()> {
    // 1. Read queries
    tracing::info!("Reading queries from {}", input.display());
    let queries = csv_io::read_queries(input)?;
    if queries.is_empty() {
        tracing::warn!(
            "No queries found in {}. Add business,category rows and run again.",
            input.display()
        );
        return Ok(());
    }
    tracing::info!("Found {} queries. Starting scraping...", queries.len());

    // 2. Scrape
    let results = run_batch(queries, limits).await?;
    print_results(&results)?;

    // 3. Export agencies and reviews
    if let Some(path) = output {
        let rows = csv_io::agency_rows(&results);
        if rows.is_empty() {
            tracing::warn!(
                "No agency profiles scraped. Possible causes: no matching listings, \
                 changed page structure, or a placeholder backend."
            );
        } else {
            let mode = csv_io::write_rows(path, AGENCY_HEADERS, &rows)?;
            log_write(path, rows.len(), mode);
        }
    }

    if let Some(path) = reviews_output {
        let rows = csv_io::review_rows(&results);
        let mode = csv_io::write_rows(path, REVIEW_HEADERS, &rows)?;
        log_write(path, rows.len(), mode);
    }

    Ok(())
}

fn log_write(path: &Path, rows: usize, mode: WriteMode) {
    match mode {
        WriteMode::Created => tracing::info!("Wrote {rows} rows to new file {}", path.display()),
        WriteMode::Appended => tracing::info!("Appended {rows} rows to {}", path.display()),
    }
}
