//! Nagarik News scraper.
//!
//! Scrapes the [home page](https://nagariknews.nagariknetwork.com/). Its
//! headline and teaser nodes are indented with tabs and newlines, which are
//! stripped rather than collapsed.

use crate::config::SourceConfig;
use crate::normalize::Whitespace;

pub const URL: &str = "https://nagariknews.nagariknetwork.com/";

pub fn config() -> SourceConfig {
    let mut config = SourceConfig::new("NagarikNews", "np", URL, "#politics h1 a");
    config.selectors.content = Some(".text > p".to_string());
    config.selectors.link = Some(".text > h1 > a".to_string());
    config.selectors.image =
        Some("article.list-group-item > div.image.default > figure > a > img".to_string());
    config.text.whitespace = Whitespace::StripIndentation;
    config.link_base = Some("https://nagariknews.nagariknetwork.com".to_string());
    config
}
