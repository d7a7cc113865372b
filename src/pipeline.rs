//! Run every source adapter and collect their records.
//!
//! A source that fails, times out or comes back empty is logged and skipped;
//! it never stops the others. Adapters share no state, so up to
//! `concurrency` of them run at once, but results are always reported in
//! registration order.

use crate::error::ScrapeError;
use crate::fetch::Fetcher;
use crate::models::Record;
use crate::scrapers::SourceAdapter;
use futures::stream::{self, StreamExt};
use std::time::Duration;
use tokio::time::timeout;
use tracing::{error, info, instrument, warn};

/// Knobs for [`scrape_all`].
#[derive(Debug, Clone, Copy)]
pub struct ScrapeOptions {
    /// Adapters in flight at once. `1` runs them strictly one after another.
    pub concurrency: usize,
    /// Upper bound on a single adapter, fetch and parsing included.
    pub adapter_timeout: Duration,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            concurrency: 1,
            adapter_timeout: Duration::from_secs(30),
        }
    }
}

/// Scrape every adapter and concatenate the results in adapter order.
#[instrument(level = "info", skip_all, fields(sources = adapters.len()))]
pub async fn scrape_all<F: Fetcher>(
    adapters: &[SourceAdapter<F>],
    options: ScrapeOptions,
) -> Vec<Record> {
    info!(
        concurrency = options.concurrency,
        "Starting news scraping"
    );

    let batches: Vec<Vec<Record>> = stream::iter(adapters)
        .map(|adapter| async move {
            let outcome = match timeout(options.adapter_timeout, adapter.scrape()).await {
                Ok(outcome) => outcome,
                Err(_) => Err(ScrapeError::Timeout {
                    source_name: adapter.source_name().to_string(),
                    after: options.adapter_timeout,
                }),
            };
            match outcome {
                Ok(records) if records.is_empty() => {
                    warn!(source = %adapter.source_name(), "Source produced no records");
                    records
                }
                Ok(records) => records,
                Err(e) => {
                    error!(source = %adapter.source_name(), error = %e, "Failed to scrape source; skipping");
                    Vec::new()
                }
            }
        })
        .buffered(options.concurrency.max(1))
        .collect()
        .await;

    let records: Vec<Record> = batches.into_iter().flatten().collect();
    info!(count = records.len(), "Total records scraped");
    records
}
