//! Text cleanup applied to raw element text before it becomes a [`Record`] field.
//!
//! Each source carries its own [`TextRules`] as configuration data, so the
//! quirks of one site (a category label glued to the headline, deeply
//! indented text nodes, a bare URL in place of a teaser) stay on that site's
//! configuration instead of in shared code.
//!
//! [`Record`]: crate::models::Record

use html_escape::decode_html_entities;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static INDENTATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?:\n|\t| {2,})").unwrap());
static BARE_LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*https?:").unwrap());

/// How whitespace inside element text is treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Whitespace {
    /// Collapse every whitespace run to a single space and trim.
    #[default]
    Collapse,
    /// Delete newlines, tabs and runs of two or more spaces outright.
    StripIndentation,
}

/// Per-source normalization rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TextRules {
    pub whitespace: Whitespace,
    /// Leading characters removed from every title (a fixed-width category label).
    pub skip_title_chars: usize,
    /// Treat a summary that is just a URL as missing.
    pub suppress_link_summaries: bool,
}

impl TextRules {
    /// Normalize a heading into a title. May return an empty string.
    pub fn title(&self, raw: &str) -> String {
        let text = normalize(raw, self.whitespace);
        if self.skip_title_chars == 0 || text.chars().count() <= self.skip_title_chars {
            return text;
        }
        text.chars()
            .skip(self.skip_title_chars)
            .collect::<String>()
            .trim()
            .to_string()
    }

    /// Normalize a teaser into a summary, or `None` when it is empty or suppressed.
    pub fn summary(&self, raw: &str) -> Option<String> {
        if self.suppress_link_summaries && BARE_LINK.is_match(raw) {
            return None;
        }
        Some(normalize(raw, self.whitespace)).filter(|s| !s.is_empty())
    }
}

/// Decode HTML entities and clean up whitespace according to `mode`.
pub fn normalize(raw: &str, mode: Whitespace) -> String {
    match mode {
        Whitespace::Collapse => decode_html_entities(raw)
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" "),
        Whitespace::StripIndentation => {
            let stripped = INDENTATION.replace_all(raw, "");
            decode_html_entities(stripped.trim()).trim().to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_whitespace_and_entities() {
        assert_eq!(
            normalize("  Rain &amp; floods\n\t in   Terai ", Whitespace::Collapse),
            "Rain & floods in Terai"
        );
    }

    #[test]
    fn test_numeric_entities_decode_to_devanagari() {
        assert_eq!(normalize("&#2344;&#2375;&#2346;&#2366;&#2354;", Whitespace::Collapse), "नेपाल");
    }

    #[test]
    fn test_strip_indentation() {
        let raw = "\n\t\t\t    संसद बैठक\n\t\t  ";
        assert_eq!(normalize(raw, Whitespace::StripIndentation), "संसद बैठक");
    }

    #[test]
    fn test_strip_indentation_keeps_single_spaces() {
        assert_eq!(
            normalize("\tBudget  session begins\n", Whitespace::StripIndentation),
            "Budgetsession begins"
        );
    }

    #[test]
    fn test_skip_title_chars_counts_characters_not_bytes() {
        let rules = TextRules {
            skip_title_chars: 6,
            ..TextRules::default()
        };
        assert_eq!(rules.title("खेलकुद नेपाल जित्यो"), "नेपाल जित्यो");
    }

    #[test]
    fn test_skip_title_chars_leaves_short_titles() {
        let rules = TextRules {
            skip_title_chars: 6,
            ..TextRules::default()
        };
        assert_eq!(rules.title("Short"), "Short");
    }

    #[test]
    fn test_summary_suppresses_bare_links() {
        let rules = TextRules {
            suppress_link_summaries: true,
            ..TextRules::default()
        };
        assert_eq!(rules.summary("\nhttps://www.news24nepal.com/x"), None);
        assert_eq!(rules.summary("Read more at the site"), Some("Read more at the site".to_string()));
    }

    #[test]
    fn test_summary_keeps_links_without_flag() {
        let rules = TextRules::default();
        assert_eq!(rules.summary("https://a.example"), Some("https://a.example".to_string()));
    }

    #[test]
    fn test_blank_summary_is_none() {
        assert_eq!(TextRules::default().summary(" \n\t "), None);
    }
}
