//! Error types for scraping, configuration and journal persistence.
//!
//! Scrape errors are recovered inside the pipeline: a failed source yields
//! zero records and a failed candidate is skipped. Configuration and journal
//! write errors are the only ones that reach `main`.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Failures while producing records from a single source.
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// The request could not be completed (connect error, read timeout, ...).
    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// The server answered with something other than 2xx.
    #[error("Expected a 2xx Success from {url} but got: {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    /// The adapter as a whole did not finish in time.
    #[error("{source_name} did not finish within {after:?}")]
    Timeout { source_name: String, after: Duration },
    /// Strict alignment found a secondary list that does not match the headings.
    #[error("{list} list has {found} elements but there are {expected} headings")]
    Misaligned {
        list: &'static str,
        expected: usize,
        found: usize,
    },
    /// A single candidate lacked a required attribute.
    #[error("Candidate {index} has a {element} element without `{attribute}`")]
    MissingAttribute {
        index: usize,
        element: &'static str,
        attribute: &'static str,
    },
}

/// Invalid source configuration. Fatal at startup.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read sources file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Could not parse sources file: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("{source_name}: language `{language}` is not a two-letter lowercase code")]
    InvalidLanguage {
        source_name: String,
        language: String,
    },
    #[error("{source_name}: invalid {field} selector `{selector}`: {message}")]
    InvalidSelector {
        source_name: String,
        field: &'static str,
        selector: String,
        message: String,
    },
    #[error("{source_name}: invalid link base `{base}`: {source}")]
    InvalidLinkBase {
        source_name: String,
        base: String,
        #[source]
        source: url::ParseError,
    },
    #[error("No sources configured")]
    Empty,
}

/// Failures writing the journal. Reading never fails; unreadable entries are
/// treated as absent.
#[derive(Error, Debug)]
pub enum JournalError {
    #[error("Could not create journal directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Could not encode journal entry: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("Could not write journal file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
