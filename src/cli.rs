//! Command-line interface definitions.
//!
//! Every option can also be supplied through an environment variable.

use crate::fetch::DEFAULT_TIMEOUT;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments for the news journal.
///
/// # Examples
///
/// ```sh
/// # Scrape every built-in source into ./data
/// nepal_news_journal
///
/// # Use a custom source list and run four sources at a time
/// nepal_news_journal run --sources config/sources.yaml --concurrency 4
///
/// # Print today's English headlines
/// nepal_news_journal show --language en
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Directory holding the dated journal files and today.json
    #[arg(short, long, env = "NEWS_DATA_DIR", default_value = "data", global = true)]
    pub data_dir: PathBuf,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scrape all sources and merge the results into the journal (default)
    Run(RunArgs),
    /// Print a stored journal entry as JSON
    Show(ShowArgs),
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// YAML file replacing the built-in source list
    #[arg(short, long, env = "NEWS_SOURCES")]
    pub sources: Option<PathBuf>,

    /// Reject pages whose field lists do not line up with the headings
    #[arg(long)]
    pub strict_alignment: bool,

    /// Number of sources scraped at the same time
    #[arg(long, default_value_t = 1)]
    pub concurrency: usize,

    /// HTTP timeout per source page, in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout_secs: u64,
}

impl Default for RunArgs {
    fn default() -> Self {
        Self {
            sources: None,
            strict_alignment: false,
            concurrency: 1,
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Date of the entry to print (YYYY-MM-DD); defaults to today.json
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Only records from this source (case-insensitive)
    #[arg(long)]
    pub source: Option<String>,

    /// Only records in this language
    #[arg(long)]
    pub language: Option<String>,
}
