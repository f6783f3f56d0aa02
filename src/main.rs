//! Catalog-Harvest main entry point
//!
//! This is the command-line interface for the Catalog-Harvest pipeline.

use catalog_harvest::config::{load_config_with_hash, validate, Config};
use catalog_harvest::crawler::crawl;
use catalog_harvest::normalize::clean_dataset;
use catalog_harvest::output::{print_cleaned_preview, print_crawl_stats, print_raw_preview};
use catalog_harvest::storage::write_raw_dataset;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Catalog-Harvest: a polite product catalog harvester
///
/// Crawls a paginated catalog sequentially, enriching every item from its
/// detail page, then normalizes the raw harvest into a cleaned dataset.
#[derive(Parser, Debug)]
#[command(name = "catalog-harvest")]
#[command(version = "1.0.0")]
#[command(about = "A polite product catalog harvester", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults apply when omitted)
    #[arg(short, long, global = true, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crawl the catalog and write the raw dataset
    Crawl {
        /// Upper bound on listing pages, index page included
        #[arg(long)]
        max_pages: Option<u32>,

        /// Pause after every request, in milliseconds
        #[arg(long)]
        delay_ms: Option<u64>,

        /// Where to write the raw dataset
        #[arg(long, value_name = "PATH")]
        raw: Option<String>,
    },

    /// Normalize the raw dataset into the cleaned dataset
    Clean {
        /// Raw dataset to read
        #[arg(long, value_name = "PATH")]
        raw: Option<String>,

        /// Where to write the cleaned dataset
        #[arg(long, value_name = "PATH")]
        cleaned: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    if let Err(e) = run(cli).await {
        tracing::error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = load_configuration(cli.config.as_deref())?;

    match cli.command {
        Command::Crawl {
            max_pages,
            delay_ms,
            raw,
        } => {
            if let Some(max_pages) = max_pages {
                config.crawler.max_pages = max_pages;
            }
            if let Some(delay_ms) = delay_ms {
                config.crawler.politeness_delay_ms = delay_ms;
            }
            if let Some(raw) = raw {
                config.output.raw_path = raw;
            }
            validate(&config)?;
            handle_crawl(&config).await
        }
        Command::Clean { raw, cleaned } => {
            if let Some(raw) = raw {
                config.output.raw_path = raw;
            }
            if let Some(cleaned) = cleaned {
                config.output.cleaned_path = cleaned;
            }
            validate(&config)?;
            handle_clean(&config)
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("catalog_harvest=info,warn"),
            1 => EnvFilter::new("catalog_harvest=debug,info"),
            2 => EnvFilter::new("catalog_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the config file if one was given, otherwise the built-in defaults
fn load_configuration(path: Option<&Path>) -> Result<Config, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        tracing::info!("No configuration file given, using defaults");
        return Ok(Config::default());
    };

    tracing::info!("Loading configuration from: {}", path.display());
    match load_config_with_hash(path) {
        Ok((config, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            Ok(config)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            Err(e.into())
        }
    }
}

/// Handles the crawl command: scrape every page and write the raw dataset
async fn handle_crawl(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        "Starting crawl of {} (up to {} pages, {}ms between requests)",
        config.crawler.base_url,
        config.crawler.max_pages,
        config.crawler.politeness_delay_ms
    );

    let report = crawl(config).await?;
    print_crawl_stats(&report.stats);
    println!();

    if report.records.is_empty() {
        println!("No items scraped. Exiting.");
        return Ok(());
    }

    let raw_path = Path::new(&config.output.raw_path);
    write_raw_dataset(raw_path, &report.records)?;

    println!(
        "Saved {} raw records to: {}",
        report.records.len(),
        raw_path.display()
    );
    print_raw_preview(&report.records, config.output.raw_preview_rows);

    Ok(())
}

/// Handles the clean command: normalize the raw dataset
fn handle_clean(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let raw_path = Path::new(&config.output.raw_path);
    let cleaned_path = Path::new(&config.output.cleaned_path);

    let report = clean_dataset(raw_path, cleaned_path)?;

    println!("✓ Cleaned data saved to {}", cleaned_path.display());
    if report.skipped_rows > 0 {
        println!("  ({} malformed rows skipped)", report.skipped_rows);
    }
    print_cleaned_preview(&report.records, config.output.cleaned_preview_rows);

    Ok(())
}
