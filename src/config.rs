//! Source configuration.
//!
//! A [`SourceConfig`] is the declarative description of one news site: where
//! to fetch it, which elements hold which field, and how its text is cleaned
//! up. The built-in registry lives in [`crate::scrapers`]; a YAML file with
//! the same shape can replace it at startup (see `config/sources.yaml`).

use crate::error::ConfigError;
use crate::extract::{Alignment, Selectors};
use crate::normalize::TextRules;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Selector;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, instrument};
use url::Url;

static LANGUAGE_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z]{2}$").unwrap());

/// CSS selectors for the four record fields. Only `heading` is required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct FieldSelection {
    pub heading: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Where a record's summary comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SummarySource {
    /// The content element at the heading's index. No content, no record.
    #[default]
    Selected,
    /// The content element if present, otherwise the title.
    SelectedOrTitle,
    /// Always the title; for sources without teaser text.
    Title,
}

/// Everything needed to scrape one source.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SourceConfig {
    /// Identifier stored in every record's `source` field.
    pub name: String,
    /// Two-letter lowercase language code.
    pub language: String,
    /// Page listing the headlines.
    pub url: String,
    pub selectors: FieldSelection,
    #[serde(default)]
    pub text: TextRules,
    #[serde(default)]
    pub summary: SummarySource,
    /// Base URL that link hrefs are joined onto. Without it hrefs are kept verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_base: Option<String>,
    #[serde(default = "default_image_attributes")]
    pub image_attributes: Vec<String>,
    #[serde(default)]
    pub alignment: Alignment,
}

fn default_image_attributes() -> Vec<String> {
    vec!["data-src".to_string(), "src".to_string()]
}

impl SourceConfig {
    /// Start a configuration with default rules; the site modules fill in the rest.
    pub fn new(name: &str, language: &str, url: &str, heading: &str) -> Self {
        Self {
            name: name.to_string(),
            language: language.to_string(),
            url: url.to_string(),
            selectors: FieldSelection {
                heading: heading.to_string(),
                ..FieldSelection::default()
            },
            text: TextRules::default(),
            summary: SummarySource::default(),
            link_base: None,
            image_attributes: default_image_attributes(),
            alignment: Alignment::default(),
        }
    }

    /// Check the language code and compile the selectors.
    pub fn compile(&self) -> Result<CompiledSource, ConfigError> {
        if !LANGUAGE_CODE.is_match(&self.language) {
            return Err(ConfigError::InvalidLanguage {
                source_name: self.name.clone(),
                language: self.language.clone(),
            });
        }

        let link_base = self
            .link_base
            .as_deref()
            .map(Url::parse)
            .transpose()
            .map_err(|source| ConfigError::InvalidLinkBase {
                source_name: self.name.clone(),
                base: self.link_base.clone().unwrap_or_default(),
                source,
            })?;

        let optional = |field: &'static str, selector: &Option<String>| {
            selector
                .as_deref()
                .map(|s| self.parse_selector(field, s))
                .transpose()
        };

        let selectors = Selectors {
            heading: self.parse_selector("heading", &self.selectors.heading)?,
            content: optional("content", &self.selectors.content)?,
            link: optional("link", &self.selectors.link)?,
            image: optional("image", &self.selectors.image)?,
            image_attributes: self.image_attributes.clone(),
        };

        Ok(CompiledSource {
            config: self.clone(),
            selectors,
            link_base,
        })
    }

    fn parse_selector(&self, field: &'static str, selector: &str) -> Result<Selector, ConfigError> {
        Selector::parse(selector).map_err(|e| ConfigError::InvalidSelector {
            source_name: self.name.clone(),
            field,
            selector: selector.to_string(),
            message: e.to_string(),
        })
    }
}

/// A validated [`SourceConfig`] with its selectors ready to run.
#[derive(Debug, Clone)]
pub struct CompiledSource {
    pub config: SourceConfig,
    pub selectors: Selectors,
    pub link_base: Option<Url>,
}

/// Parse a YAML list of source configurations.
pub fn parse_sources(yaml: &str) -> Result<Vec<SourceConfig>, ConfigError> {
    let sources: Vec<SourceConfig> = serde_yaml::from_str(yaml)?;
    if sources.is_empty() {
        return Err(ConfigError::Empty);
    }
    Ok(sources)
}

/// Load source configurations from a YAML file.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn load_sources(path: &Path) -> Result<Vec<SourceConfig>, ConfigError> {
    let yaml = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    let sources = parse_sources(&yaml)?;
    info!(count = sources.len(), "Loaded source configuration");
    Ok(sources)
}
