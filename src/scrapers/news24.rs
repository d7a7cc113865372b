//! News24 Nepal scraper.
//!
//! Scrapes the [news listing](https://www.news24nepal.com/news-1). Each
//! headline span starts with a six character category label, and the page
//! has no teaser text, so the title doubles as the summary.

use crate::config::{SourceConfig, SummarySource};

pub const URL: &str = "https://www.news24nepal.com/news-1";

pub fn config() -> SourceConfig {
    let mut config = SourceConfig::new(
        "News24",
        "np",
        URL,
        ".half-more-news > div > div > span:nth-child(1)",
    );
    config.selectors.link = Some(".half-more-news > div > div > span > a".to_string());
    config.selectors.image = Some(".half-more-news > div > figure > a > img".to_string());
    config.text.skip_title_chars = 6;
    config.summary = SummarySource::Title;
    config
}
