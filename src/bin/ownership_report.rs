//! Ownership Report CLI
//!
//! Crawls the ownership graph of a company and prints a report of every
//! company reached through corporate persons with significant control.
//!
//! Usage:
//!   cargo run --bin ownership_report -- 123
//!   cargo run --bin ownership_report -- 00000123 --as-of 2024-01-01 --max-depth 3
//!
//! The API key is read from `COMPANIES_HOUSE_API_KEY` (a `.env` file is
//! honoured). Logs go to stderr and are controlled with `RUST_LOG`.

use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::Parser;
use colored::Colorize;

use ownership_crawler::{
    CompaniesHouseClient, CrawlOptions, Crawler, CrawlerConfig, DescriptionTemplates, WriterSink,
};

/// Ownership and filing report for a registered company
#[derive(Parser, Debug)]
#[command(name = "ownership_report")]
#[command(about = "Report officers, controllers and recent filings across a company's ownership graph")]
struct Args {
    /// Company number to start from (padded to 8 characters)
    company_number: String,

    /// Registry API key
    #[arg(long, env = "COMPANIES_HOUSE_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Filing description template table (YAML)
    #[arg(long, short = 't')]
    templates: Option<PathBuf>,

    /// Report date used for the filing cutoff (default: today, UTC)
    #[arg(long)]
    as_of: Option<NaiveDate>,

    /// Items requested per page
    #[arg(long)]
    page_size: Option<usize>,

    /// Maximum ownership depth to follow (root = 0)
    #[arg(long, short = 'd')]
    max_depth: Option<usize>,

    /// Registry API base URL
    #[arg(long)]
    base_url: Option<String>,
}

fn build_config(args: &Args) -> Result<CrawlerConfig> {
    let mut config = CrawlerConfig::new(args.api_key.clone()).with_env_overrides()?;
    if let Some(base_url) = &args.base_url {
        config = config.with_base_url(base_url.clone());
    }
    if let Some(page_size) = args.page_size {
        config = config.with_page_size(page_size);
    }
    if let Some(path) = &args.templates {
        config = config.with_templates_path(path.clone());
    }
    if let Some(depth) = args.max_depth {
        config = config.with_max_depth(depth);
    }
    config.validate()?;
    Ok(config)
}

async fn run(args: Args) -> Result<()> {
    let config = build_config(&args)?;
    let templates = DescriptionTemplates::load_or_builtin(config.templates_path.as_deref())?;
    let client = CompaniesHouseClient::new(&config).context("Failed to create registry client")?;
    let as_of = args.as_of.unwrap_or_else(|| Utc::now().date_naive());

    let crawler = Crawler::new(&client, &templates, CrawlOptions::from(&config), as_of);

    let stdout = std::io::stdout();
    let mut sink = WriterSink::new(BufWriter::new(stdout.lock()));
    let summary = crawler
        .run(&args.company_number, &mut sink)
        .await
        .with_context(|| format!("Crawl from company {} failed", args.company_number))?;
    sink.into_inner().flush()?;

    tracing::info!(
        companies = summary.visited.len(),
        unavailable = summary.unavailable.len(),
        sections_failed = summary.sections_failed,
        "Report complete"
    );
    Ok(())
}

#[tokio::main]
async fn main() {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize tracing (stderr, so the report on stdout stays clean)
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();

    if let Err(e) = run(args).await {
        eprintln!("{} {:#}", "ERROR:".red().bold(), e);
        std::process::exit(1);
    }
}
