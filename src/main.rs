//! # Nepal News Journal
//!
//! Scrapes headline listings from a fixed set of Nepali news sites and
//! accumulates them into a deduplicated, date-partitioned JSON journal.
//!
//! ## Usage
//!
//! ```sh
//! nepal_news_journal -d ./data
//! nepal_news_journal show --source Ekantipur
//! ```
//!
//! ## Architecture
//!
//! 1. **Configuration**: Load and validate the source list (built-in or YAML)
//! 2. **Scraping**: Each source adapter fetches its page and aligns the
//!    heading, summary, link and image lists into records
//! 3. **Persistence**: Merge the run's records into `data/<date>.json` and
//!    `data/today.json`, dropping duplicates by title and source

use chrono::Local;
use clap::Parser;
use std::error::Error;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod config;
mod error;
mod extract;
mod fetch;
mod models;
mod normalize;
mod outputs;
mod pipeline;
mod scrapers;
mod utils;

use cli::{Cli, Command, RunArgs, ShowArgs};
use extract::Alignment;
use fetch::HttpFetcher;
use outputs::journal::{JournalStore, Sink};
use pipeline::{ScrapeOptions, scrape_all};
use scrapers::SourceAdapter;
use utils::ensure_writable_dir;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    match args.command {
        Some(Command::Show(show_args)) => show(&args.data_dir, show_args).await,
        Some(Command::Run(run_args)) => run(&args.data_dir, run_args).await,
        None => run(&args.data_dir, RunArgs::default()).await,
    }
}

/// Scrape every source once and persist the results.
#[instrument(level = "info", skip_all, fields(data_dir = %data_dir.display()))]
async fn run(data_dir: &Path, args: RunArgs) -> Result<(), Box<dyn Error>> {
    let start_time = std::time::Instant::now();
    info!("News scraper started");

    // Early check: ensure the data dir is writable before fetching anything
    if let Err(e) = ensure_writable_dir(data_dir).await {
        error!(
            error = %e,
            "Data directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    let configs = match &args.sources {
        Some(path) => config::load_sources(path).await?,
        None => scrapers::builtin(),
    };

    let timeout = Duration::from_secs(args.timeout_secs);
    let mut adapters = Vec::with_capacity(configs.len());
    for mut source in configs {
        if args.strict_alignment {
            source.alignment = Alignment::Strict;
        }
        let compiled = source.compile()?;
        adapters.push(SourceAdapter::new(compiled, HttpFetcher::new(timeout)?));
    }
    info!(sources = adapters.len(), "Configured sources");

    let options = ScrapeOptions {
        concurrency: args.concurrency,
        adapter_timeout: timeout * 2,
    };
    let records = scrape_all(&adapters, options).await;
    drop(adapters);

    if records.is_empty() {
        warn!("No records to save");
        return Ok(());
    }

    let store = JournalStore::new(data_dir);
    let report = match store.persist(&records, Local::now().fixed_offset()).await {
        Ok(report) => report,
        Err(e) => {
            error!(error = %e, "Failed to persist journal");
            return Err(e.into());
        }
    };

    for sink in [&report.dated, &report.current] {
        info!(
            path = %sink.path.display(),
            added = sink.added,
            total = sink.total,
            rolled_over = sink.rolled_over,
            "Saved records"
        );
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "News scraper completed"
    );
    Ok(())
}

/// Print a stored entry, optionally filtered, as pretty JSON.
#[instrument(level = "info", skip_all, fields(data_dir = %data_dir.display()))]
async fn show(data_dir: &Path, args: ShowArgs) -> Result<(), Box<dyn Error>> {
    let store = JournalStore::new(data_dir);
    let (sink, date) = match args.date {
        Some(date) => (Sink::Dated, date),
        None => (Sink::Current, Local::now().date_naive()),
    };
    let date = date.format("%Y-%m-%d").to_string();

    let Some(entry) = store.load(sink, &date).await else {
        return Err(format!(
            "No journal entry at {}",
            store.path(sink, &date).display()
        )
        .into());
    };

    let filtered = entry.filter(args.source.as_deref(), args.language.as_deref());
    info!(
        date = %filtered.date,
        matched = filtered.total_articles,
        stored = entry.total_articles,
        "Loaded journal entry"
    );
    println!("{}", serde_json::to_string_pretty(&filtered)?);
    Ok(())
}
