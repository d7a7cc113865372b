//! Data models for scraped headlines and the persisted journal.
//!
//! - [`Record`]: One normalized, validated article from a news source
//! - [`JournalEntry`]: The JSON document stored per date and as `today.json`
//!
//! Field names are serialized verbatim, so the JSON written to disk uses the
//! same snake_case keys as the structs below.

use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// A canonical article after extraction, normalization and validation.
///
/// Adapters only construct a `Record` when both `title` and `summary` are
/// non-empty. `source_url` and `image_url` may be empty strings.
///
/// Every field defaults to empty when read back, so a hand-edited or older
/// journal file still loads instead of being discarded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Record {
    /// Headline text.
    pub title: String,
    /// Teaser text. Equal to `title` for sources without a distinct summary.
    pub summary: String,
    /// Identifier of the source adapter, e.g. `"News24"`.
    pub source: String,
    /// Two-letter lowercase language code of the source.
    pub language: String,
    /// Link to the full article.
    pub source_url: String,
    /// Link to the article's teaser image.
    pub image_url: String,
}

impl Record {
    /// The `(title, source)` pair two records are compared by when merging.
    pub fn key(&self) -> (&str, &str) {
        (self.title.as_str(), self.source.as_str())
    }
}

/// One persisted journal document.
///
/// Two of these live on disk at any time: `data/<date>.json`, which only ever
/// grows for its date, and `data/today.json`, which is replaced when the date
/// changes.
///
/// Missing keys read as empty. Only `articles` matters when merging; the
/// other fields are recomputed on every write.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct JournalEntry {
    /// RFC 3339 timestamp of the run that last wrote this entry.
    pub scraped_at: String,
    /// Calendar date in `YYYY-MM-DD` format. Empty when unknown.
    pub date: String,
    /// Number of records in `articles`.
    pub total_articles: usize,
    /// Distinct `source` values present in `articles`, sorted.
    pub sources: Vec<String>,
    /// Accumulated records in insertion order.
    pub articles: Vec<Record>,
}

impl JournalEntry {
    /// Build an entry whose counters and source list are derived from `articles`.
    pub fn new(scraped_at: String, date: String, articles: Vec<Record>) -> Self {
        let sources = articles
            .iter()
            .map(|a| a.source.clone())
            .unique()
            .sorted()
            .collect();
        Self {
            scraped_at,
            date,
            total_articles: articles.len(),
            sources,
            articles,
        }
    }

    /// Return a copy restricted to matching records.
    ///
    /// `source` is compared case-insensitively, `language` exactly.
    pub fn filter(&self, source: Option<&str>, language: Option<&str>) -> JournalEntry {
        let articles = self
            .articles
            .iter()
            .filter(|a| source.is_none_or(|s| a.source.eq_ignore_ascii_case(s)))
            .filter(|a| language.is_none_or(|l| a.language == l))
            .cloned()
            .collect();
        JournalEntry::new(self.scraped_at.clone(), self.date.clone(), articles)
    }
}

#[cfg(test)]
pub(crate) fn record(title: &str, source: &str) -> Record {
    Record {
        title: title.to_string(),
        summary: format!("{title} summary"),
        source: source.to_string(),
        language: "np".to_string(),
        source_url: String::new(),
        image_url: String::new(),
    }
}
