//! News source adapters.
//!
//! Every source is a [`SourceConfig`] bound to its own [`Fetcher`] inside a
//! [`SourceAdapter`]. Adding a source means adding a module that returns its
//! configuration and listing it in [`builtin`]; nothing else changes.
//!
//! # Supported Sources
//!
//! | Source | Module | Language | Notes |
//! |--------|--------|----------|-------|
//! | News24 Nepal | [`news24`] | np | Headline carries a category label; no teaser |
//! | The Kathmandu Post | [`kathmandu_post`] | en | Relative links |
//! | Ekantipur | [`ekantipur`] | np | Absolute links |
//! | Nagarik News | [`nagarik_news`] | np | Deeply indented text nodes, relative links |

use crate::config::{CompiledSource, SourceConfig, SummarySource};
use crate::error::ScrapeError;
use crate::extract::{Candidate, extract};
use crate::fetch::{Fetcher, HttpFetcher};
use crate::models::Record;
use scraper::Html;
use tracing::{debug, info, instrument, warn};

pub mod ekantipur;
pub mod kathmandu_post;
pub mod nagarik_news;
pub mod news24;

/// The built-in sources, in the order their records are reported.
pub fn builtin() -> Vec<SourceConfig> {
    vec![
        news24::config(),
        kathmandu_post::config(),
        ekantipur::config(),
        nagarik_news::config(),
    ]
}

/// One news site: its configuration plus the session used to fetch it.
#[derive(Debug)]
pub struct SourceAdapter<F = HttpFetcher> {
    source: CompiledSource,
    fetcher: F,
}

impl<F: Fetcher> SourceAdapter<F> {
    pub fn new(source: CompiledSource, fetcher: F) -> Self {
        Self { source, fetcher }
    }

    /// Value written to every record's `source` field.
    pub fn source_name(&self) -> &str {
        &self.source.config.name
    }

    /// Two-letter language code of this source.
    pub fn language(&self) -> &str {
        &self.source.config.language
    }

    /// Fetch the source page and turn it into validated records.
    ///
    /// Candidates without a title or summary are dropped at debug level and
    /// failed candidates are logged and skipped.
    ///
    /// # Returns
    ///
    /// The source's records in page order, possibly empty.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError`] if:
    /// - The request fails or the server answers with a non-2xx status
    /// - Strict alignment is on and the page's field lists do not line up
    #[instrument(level = "info", skip_all, fields(source = %self.source_name(), language = %self.language()))]
    pub async fn scrape(&self) -> Result<Vec<Record>, ScrapeError> {
        let url = &self.source.config.url;
        let body = self.fetcher.fetch(url).await?;
        let records = self.parse(&body)?;
        info!(count = records.len(), %url, "Scraped records");
        Ok(records)
    }

    /// Extract records from an already fetched page.
    pub fn parse(&self, body: &str) -> Result<Vec<Record>, ScrapeError> {
        let document = Html::parse_document(body);
        let candidates = extract(
            &document,
            &self.source.selectors,
            self.source.config.alignment,
        )?;

        let records = candidates
            .into_iter()
            .filter_map(|candidate| match candidate {
                Ok(candidate) => self.to_record(candidate),
                Err(e) => {
                    warn!(source = %self.source_name(), error = %e, "Skipping candidate");
                    None
                }
            })
            .collect();
        Ok(records)
    }

    fn to_record(&self, candidate: Candidate) -> Option<Record> {
        let config = &self.source.config;
        let title = config.text.title(&candidate.heading);
        if title.is_empty() {
            debug!(index = candidate.index, "Dropping candidate without title");
            return None;
        }

        let selected = candidate
            .content
            .as_deref()
            .and_then(|raw| config.text.summary(raw));
        let summary = match config.summary {
            SummarySource::Selected => selected,
            SummarySource::SelectedOrTitle => selected.or_else(|| Some(title.clone())),
            SummarySource::Title => Some(title.clone()),
        };
        let Some(summary) = summary else {
            debug!(index = candidate.index, %title, "Dropping candidate without summary");
            return None;
        };

        Some(Record {
            title,
            summary,
            source: config.name.clone(),
            language: config.language.clone(),
            source_url: self.resolve_link(candidate.href.as_deref().unwrap_or_default()),
            image_url: candidate.image.unwrap_or_default(),
        })
    }

    /// Join `href` onto the source's link base, or keep it verbatim without one.
    fn resolve_link(&self, href: &str) -> String {
        let href = href.trim();
        if href.is_empty() {
            return String::new();
        }
        match &self.source.link_base {
            Some(base) => match base.join(href) {
                Ok(resolved) => resolved.to_string(),
                Err(e) => {
                    debug!(%href, error = %e, "Could not resolve link; keeping it as is");
                    href.to_string()
                }
            },
            None => href.to_string(),
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::fetch::testing::StaticFetcher;

    pub fn adapter(config: SourceConfig, fetcher: StaticFetcher) -> SourceAdapter<StaticFetcher> {
        SourceAdapter::new(config.compile().unwrap(), fetcher)
    }

    pub fn parse(config: SourceConfig, html: &str) -> Vec<Record> {
        adapter(config, StaticFetcher::default()).parse(html).unwrap()
    }
}
