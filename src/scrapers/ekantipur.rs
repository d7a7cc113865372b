//! Ekantipur scraper.
//!
//! Scrapes the [home page](https://ekantipur.com/). Teaser blocks carry
//! absolute links, so hrefs are stored as they appear.

use crate::config::SourceConfig;

pub const URL: &str = "https://ekantipur.com/";

pub fn config() -> SourceConfig {
    let mut config = SourceConfig::new("Ekantipur", "np", URL, "div.teaser > h2");
    config.selectors.content = Some("div.teaser > p".to_string());
    config.selectors.link = Some("div.teaser > h2 > a".to_string());
    config.selectors.image = Some(".listLayout img".to_string());
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrapers::testing::parse;

    const PAGE: &str = r#"
        <div class="listLayout">
          <div class="teaser">
            <h2><a href="https://ekantipur.com/news/2024/01/02/1.html">संसद बैठक आज</a></h2>
            <p>संसदको हिउँदे अधिवेशन आजदेखि सुरु हुँदैछ ।</p>
          </div>
          <img data-src="https://assets-cdn.ekantipur.com/1.jpg">
          <div class="teaser">
            <h2><a href="https://ekantipur.com/news/2024/01/02/2.html">बजार भाउ</a></h2>
            <p>
              तरकारीको भाउ
              बढ्यो
            </p>
          </div>
        </div>
    "#;

    #[test]
    fn test_home_page() {
        let records = parse(config(), PAGE);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title, "संसद बैठक आज");
        assert_eq!(records[0].source_url, "https://ekantipur.com/news/2024/01/02/1.html");
        assert_eq!(records[0].image_url, "https://assets-cdn.ekantipur.com/1.jpg");
        assert_eq!(records[1].summary, "तरकारीको भाउ बढ्यो");
        assert_eq!(records[1].image_url, "");
    }
}
