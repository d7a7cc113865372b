//! Deduplicating journal store.
//!
//! One [`JournalStore::persist`] call writes both sinks:
//!
//! - [`Sink::Dated`] (`<date>.json`) accumulates every distinct record seen
//!   on that calendar date.
//! - [`Sink::Current`] (`today.json`) accumulates the same way until the
//!   date changes; the first run on a new date replaces it with that run's
//!   records only. An entry without a stored date is merged into, not
//!   replaced.
//!
//! Records are identified by `(title, source)`. The first copy wins, both
//! against what is already stored and within the incoming batch.
//!
//! The read-merge-write cycle is not safe to run concurrently against the
//! same directory; call `persist` once per run after all sources finish.

use crate::error::JournalError;
use crate::models::{JournalEntry, Record};
use crate::outputs::json::{read_entry, write_entry};
use chrono::{DateTime, FixedOffset};
use std::collections::HashSet;
use std::path::PathBuf;
use tokio::fs;
use tracing::{info, instrument};

/// File name of the rolling current entry.
pub const CURRENT_FILE: &str = "today.json";

/// The two entries a run writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sink {
    /// `<date>.json`, append-only for its date.
    Dated,
    /// `today.json`, rolled over when the date changes.
    Current,
}

impl Sink {
    /// File name of this sink for `date` (`YYYY-MM-DD`).
    pub fn file_name(self, date: &str) -> String {
        match self {
            Sink::Dated => format!("{date}.json"),
            Sink::Current => CURRENT_FILE.to_string(),
        }
    }
}

/// What happened to one sink during [`JournalStore::persist`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkReport {
    pub path: PathBuf,
    /// Records from this run that were not already present.
    pub added: usize,
    /// Records in the entry after the write.
    pub total: usize,
    /// The previous entry belonged to another date and was discarded.
    pub rolled_over: bool,
}

/// Outcome of a [`JournalStore::persist`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistReport {
    pub dated: SinkReport,
    pub current: SinkReport,
}

/// Journal directory holding the dated entries and `today.json`.
#[derive(Debug, Clone)]
pub struct JournalStore {
    dir: PathBuf,
}

impl JournalStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self, sink: Sink, date: &str) -> PathBuf {
        self.dir.join(sink.file_name(date))
    }

    /// Read a sink. Missing or corrupt entries are `None`.
    pub async fn load(&self, sink: Sink, date: &str) -> Option<JournalEntry> {
        read_entry(&self.path(sink, date)).await
    }

    /// Merge `records` into the dated and current entries for `now`'s date.
    ///
    /// The directory is created if needed. The dated entry is written first,
    /// then the current one.
    ///
    /// # Arguments
    ///
    /// * `records` - The run's records in report order; duplicates are allowed
    /// * `now` - Run timestamp; its local date picks the entry and its RFC 3339
    ///   form becomes `scraped_at`
    ///
    /// # Returns
    ///
    /// A [`PersistReport`] with the added and total counts of each sink.
    ///
    /// # Errors
    ///
    /// Returns [`JournalError`] if the directory cannot be created or an
    /// entry cannot be encoded or written. Unreadable existing entries are not
    /// an error; they are logged and replaced.
    #[instrument(level = "info", skip_all, fields(dir = %self.dir.display(), records = records.len()))]
    pub async fn persist(
        &self,
        records: &[Record],
        now: DateTime<FixedOffset>,
    ) -> Result<PersistReport, JournalError> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| JournalError::CreateDir {
                path: self.dir.clone(),
                source,
            })?;

        let date = now.format("%Y-%m-%d").to_string();
        let scraped_at = now.to_rfc3339();

        let dated = self.update(Sink::Dated, &date, &scraped_at, records).await?;
        let current = self.update(Sink::Current, &date, &scraped_at, records).await?;

        Ok(PersistReport { dated, current })
    }

    async fn update(
        &self,
        sink: Sink,
        date: &str,
        scraped_at: &str,
        records: &[Record],
    ) -> Result<SinkReport, JournalError> {
        let path = self.path(sink, date);
        let previous = read_entry(&path).await;

        let (existing, rolled_over) = match previous {
            Some(entry)
                if sink == Sink::Current && !entry.date.is_empty() && entry.date != date =>
            {
                info!(from = %entry.date, to = %date, "Date changed; replacing current entry");
                (Vec::new(), true)
            }
            Some(entry) => (entry.articles, false),
            None => (Vec::new(), false),
        };

        let (merged, added) = merge(existing, records);
        let total = merged.len();
        let entry = JournalEntry::new(scraped_at.to_string(), date.to_string(), merged);
        write_entry(&entry, &path).await?;

        info!(
            path = %path.display(),
            added,
            skipped = records.len() - added,
            total,
            rolled_over,
            "Updated journal entry"
        );

        Ok(SinkReport {
            path,
            added,
            total,
            rolled_over,
        })
    }
}

/// Append every record of `incoming` whose `(title, source)` is not yet present.
///
/// Existing records keep their order and come first. A key repeated inside
/// `incoming` is accepted once, at its first position.
///
/// # Returns
///
/// The merged list and the number of records accepted from `incoming`.
///
/// # Example
///
/// ```text
/// existing: [A/X]           incoming: [A/X, B/X, B/X]
/// merged:   [A/X, B/X]      added: 1
/// ```
pub fn merge(existing: Vec<Record>, incoming: &[Record]) -> (Vec<Record>, usize) {
    let owned_key = |r: &Record| {
        let (title, source) = r.key();
        (title.to_string(), source.to_string())
    };
    let mut seen: HashSet<(String, String)> = existing.iter().map(owned_key).collect();

    let mut merged = existing;
    let before = merged.len();
    for record in incoming {
        if seen.insert(owned_key(record)) {
            merged.push(record.clone());
        }
    }

    let added = merged.len() - before;
    (merged, added)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record;
    use chrono::TimeZone;

    fn at(year: i32, month: u32, day: u32, hour: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(5 * 3600 + 45 * 60)
            .unwrap()
            .with_ymd_and_hms(year, month, day, hour, 0, 0)
            .unwrap()
    }

    fn titles(entry: &JournalEntry) -> Vec<&str> {
        entry.articles.iter().map(|r| r.title.as_str()).collect()
    }

    #[test]
    fn test_merge_collapses_existing_duplicates() {
        let existing = vec![record("A", "X")];
        let (merged, added) = merge(existing, &[record("A", "X"), record("B", "X")]);
        assert_eq!(added, 1);
        let titles: Vec<_> = merged.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B"]);
    }

    #[test]
    fn test_merge_collapses_within_batch() {
        let mut second = record("A", "X");
        second.summary = "a different teaser".to_string();
        let (merged, added) = merge(Vec::new(), &[record("A", "X"), second]);
        assert_eq!(added, 1);
        assert_eq!(merged[0].summary, "A summary");
    }

    #[test]
    fn test_merge_key_includes_source() {
        let (merged, added) = merge(vec![record("A", "X")], &[record("A", "Y")]);
        assert_eq!(added, 1);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_merge_keeps_existing_first() {
        let existing = vec![record("C", "X"), record("A", "X")];
        let (merged, _) = merge(existing, &[record("B", "X"), record("C", "X")]);
        let titles: Vec<_> = merged.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["C", "A", "B"]);
    }

    #[test]
    fn test_sink_file_names() {
        assert_eq!(Sink::Dated.file_name("2024-01-02"), "2024-01-02.json");
        assert_eq!(Sink::Current.file_name("2024-01-02"), "today.json");
    }

    #[tokio::test]
    async fn test_first_run_creates_both_entries() {
        let dir = tempfile::tempdir().unwrap();
        let store = JournalStore::new(dir.path().join("data"));

        let report = store
            .persist(&[record("A", "X"), record("B", "Y")], at(2024, 1, 1, 9))
            .await
            .unwrap();

        assert_eq!(report.dated.added, 2);
        assert_eq!(report.current.total, 2);
        assert!(!report.current.rolled_over);

        let dated = store.load(Sink::Dated, "2024-01-01").await.unwrap();
        assert_eq!(dated.date, "2024-01-01");
        assert_eq!(dated.total_articles, 2);
        assert_eq!(dated.sources, vec!["X", "Y"]);
        assert_eq!(dated.scraped_at, "2024-01-01T09:00:00+05:45");

        let current = store.load(Sink::Current, "2024-01-01").await.unwrap();
        assert_eq!(current.articles, dated.articles);
    }

    #[tokio::test]
    async fn test_same_day_persist_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = JournalStore::new(dir.path());
        let batch = [record("A", "X"), record("B", "X")];

        store.persist(&batch, at(2024, 1, 1, 9)).await.unwrap();
        let report = store.persist(&batch, at(2024, 1, 1, 15)).await.unwrap();

        assert_eq!(report.dated.added, 0);
        assert_eq!(report.dated.total, 2);
        assert_eq!(report.current.added, 0);
        assert_eq!(report.current.total, 2);
        let dated = store.load(Sink::Dated, "2024-01-01").await.unwrap();
        assert_eq!(dated.total_articles, 2);
        assert_eq!(dated.scraped_at, "2024-01-01T15:00:00+05:45");
    }

    #[tokio::test]
    async fn test_same_day_appends_new_records() {
        let dir = tempfile::tempdir().unwrap();
        let store = JournalStore::new(dir.path());

        store.persist(&[record("A", "X")], at(2024, 1, 1, 9)).await.unwrap();
        store
            .persist(&[record("A", "X"), record("B", "X")], at(2024, 1, 1, 15))
            .await
            .unwrap();

        let current = store.load(Sink::Current, "2024-01-01").await.unwrap();
        assert_eq!(titles(&current), vec!["A", "B"]);
    }

    #[tokio::test]
    async fn test_date_change_rolls_over_current() {
        let dir = tempfile::tempdir().unwrap();
        let store = JournalStore::new(dir.path());

        store
            .persist(&[record("Old", "X"), record("Older", "X")], at(2024, 1, 1, 20))
            .await
            .unwrap();
        let report = store.persist(&[record("R1", "X")], at(2024, 1, 2, 7)).await.unwrap();

        assert!(report.current.rolled_over);
        assert_eq!(report.current.total, 1);
        assert!(!report.dated.rolled_over);

        let current = store.load(Sink::Current, "2024-01-02").await.unwrap();
        assert_eq!(current.date, "2024-01-02");
        assert_eq!(titles(&current), vec!["R1"]);

        let yesterday = store.load(Sink::Dated, "2024-01-01").await.unwrap();
        assert_eq!(titles(&yesterday), vec!["Old", "Older"]);
        let today = store.load(Sink::Dated, "2024-01-02").await.unwrap();
        assert_eq!(titles(&today), vec!["R1"]);
    }

    #[tokio::test]
    async fn test_rollover_still_collapses_batch_duplicates() {
        let dir = tempfile::tempdir().unwrap();
        let store = JournalStore::new(dir.path());

        store.persist(&[record("Old", "X")], at(2024, 1, 1, 20)).await.unwrap();
        let report = store
            .persist(&[record("R1", "X"), record("R1", "X")], at(2024, 1, 2, 7))
            .await
            .unwrap();
        assert_eq!(report.current.total, 1);
    }

    #[tokio::test]
    async fn test_corrupt_entries_are_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let store = JournalStore::new(dir.path());
        std::fs::write(store.path(Sink::Dated, "2024-01-01"), "not json").unwrap();
        std::fs::write(store.path(Sink::Current, "2024-01-01"), "{").unwrap();

        let report = store.persist(&[record("A", "X")], at(2024, 1, 1, 9)).await.unwrap();
        assert_eq!(report.dated.total, 1);
        assert_eq!(report.current.total, 1);
        assert!(!report.current.rolled_over);
        assert!(store.load(Sink::Dated, "2024-01-01").await.is_some());
    }

    fn write_raw(store: &JournalStore, sink: Sink, date: &str, json: &str) {
        std::fs::write(store.path(sink, date), json).unwrap();
    }

    #[tokio::test]
    async fn test_partial_dated_entry_keeps_its_articles() {
        let dir = tempfile::tempdir().unwrap();
        let store = JournalStore::new(dir.path());
        write_raw(
            &store,
            Sink::Dated,
            "2024-01-01",
            r#"{"date":"2024-01-01","articles":[{"title":"Old","summary":"s","source":"X","language":"np"}]}"#,
        );

        let report = store.persist(&[record("New", "X")], at(2024, 1, 1, 9)).await.unwrap();
        assert_eq!(report.dated.added, 1);
        assert_eq!(report.dated.total, 2);

        let dated = store.load(Sink::Dated, "2024-01-01").await.unwrap();
        assert_eq!(titles(&dated), vec!["Old", "New"]);
        assert_eq!(dated.total_articles, 2);
        assert_eq!(dated.scraped_at, "2024-01-01T09:00:00+05:45");
    }

    #[tokio::test]
    async fn test_current_entry_with_empty_date_is_merged() {
        let dir = tempfile::tempdir().unwrap();
        let store = JournalStore::new(dir.path());
        write_raw(
            &store,
            Sink::Current,
            "2024-01-01",
            r#"{"scraped_at":"","date":"","total_articles":1,"articles":[{"title":"Old","summary":"s","source":"X","language":"np"}]}"#,
        );

        let report = store.persist(&[record("New", "X")], at(2024, 1, 1, 9)).await.unwrap();
        assert!(!report.current.rolled_over);
        assert_eq!(report.current.total, 2);

        let current = store.load(Sink::Current, "2024-01-01").await.unwrap();
        assert_eq!(titles(&current), vec!["Old", "New"]);
        assert_eq!(current.date, "2024-01-01");
    }

    #[tokio::test]
    async fn test_current_entry_without_date_key_is_merged() {
        let dir = tempfile::tempdir().unwrap();
        let store = JournalStore::new(dir.path());
        write_raw(
            &store,
            Sink::Current,
            "2024-01-01",
            r#"{"articles":[{"title":"Old","summary":"s","source":"X","language":"np"}]}"#,
        );

        let report = store
            .persist(&[record("Old", "X"), record("New", "X")], at(2024, 1, 1, 9))
            .await
            .unwrap();
        assert!(!report.current.rolled_over);
        assert_eq!(report.current.added, 1);
        assert_eq!(report.current.total, 2);
    }

    #[tokio::test]
    async fn test_unwritable_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("data");
        std::fs::write(&blocker, "a file, not a directory").unwrap();

        let store = JournalStore::new(&blocker);
        let err = store.persist(&[record("A", "X")], at(2024, 1, 1, 9)).await.unwrap_err();
        assert!(matches!(err, JournalError::CreateDir { .. }));
    }
}
