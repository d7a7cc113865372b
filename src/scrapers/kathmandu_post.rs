//! The Kathmandu Post scraper.
//!
//! Scrapes the [front page](https://www.kathmandupost.com). Story links on
//! the page are site-relative.

use crate::config::SourceConfig;

pub const URL: &str = "https://www.kathmandupost.com";

pub fn config() -> SourceConfig {
    let mut config = SourceConfig::new("KathmanduPost", "en", URL, "article > h3");
    config.selectors.content = Some("article > p".to_string());
    config.selectors.link = Some("article > h3 > a".to_string());
    config.selectors.image = Some(".pull-right .img-responsive".to_string());
    config.link_base = Some("https://kathmandupost.com".to_string());
    config
}
