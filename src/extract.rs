//! Positional field extraction.
//!
//! A source page is queried with four independent selectors. The heading
//! list decides how many candidates there are; the content, link and image
//! lists are read at the same index when they are long enough. Nothing ties
//! the lists together other than their order in the document, so a stray
//! element in one list shifts every later pairing. [`Alignment::Strict`]
//! refuses such pages instead of pairing them blindly.

use crate::error::ScrapeError;
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// How secondary lists are paired with headings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    /// Pair by index; missing entries are treated as absent.
    #[default]
    Trusting,
    /// Every non-empty secondary list must have exactly one entry per heading.
    Strict,
}

/// Compiled selectors for one source.
#[derive(Debug, Clone)]
pub struct Selectors {
    pub heading: Selector,
    pub content: Option<Selector>,
    pub link: Option<Selector>,
    pub image: Option<Selector>,
    /// Attributes tried in order for an image URL.
    pub image_attributes: Vec<String>,
}

/// Raw, un-normalized fields for one heading.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Candidate {
    pub index: usize,
    pub heading: String,
    pub content: Option<String>,
    pub href: Option<String>,
    pub image: Option<String>,
}

/// Extract one candidate per heading.
///
/// # Arguments
///
/// * `document` - The parsed source page
/// * `selectors` - Compiled selectors of the source
/// * `alignment` - Whether secondary list lengths are checked against the headings
///
/// # Returns
///
/// One entry per heading, in document order. An inner `Err` belongs to a
/// single index (a link without `href`) and leaves the other candidates
/// intact.
///
/// # Errors
///
/// Returns [`ScrapeError::Misaligned`] in [`Alignment::Strict`] mode when a
/// non-empty content, link or image list has a different length than the
/// heading list.
pub fn extract(
    document: &Html,
    selectors: &Selectors,
    alignment: Alignment,
) -> Result<Vec<Result<Candidate, ScrapeError>>, ScrapeError> {
    let headings: Vec<ElementRef> = document.select(&selectors.heading).collect();
    let contents = select_all(document, selectors.content.as_ref());
    let links = select_all(document, selectors.link.as_ref());
    let images = select_all(document, selectors.image.as_ref());

    debug!(
        headings = headings.len(),
        contents = contents.len(),
        links = links.len(),
        images = images.len(),
        "Selected field lists"
    );

    if alignment == Alignment::Strict {
        for (list, elements) in [("content", &contents), ("link", &links), ("image", &images)] {
            if !elements.is_empty() && elements.len() != headings.len() {
                return Err(ScrapeError::Misaligned {
                    list,
                    expected: headings.len(),
                    found: elements.len(),
                });
            }
        }
    }

    let candidates = headings
        .iter()
        .enumerate()
        .map(|(index, heading)| -> Result<Candidate, ScrapeError> {
            let href = match links.get(index) {
                Some(link) => Some(
                    link.value()
                        .attr("href")
                        .ok_or(ScrapeError::MissingAttribute {
                            index,
                            element: "link",
                            attribute: "href",
                        })?
                        .to_string(),
                ),
                None => None,
            };
            Ok(Candidate {
                index,
                heading: text_of(heading),
                content: contents.get(index).map(text_of),
                href,
                image: images
                    .get(index)
                    .and_then(|img| image_url(img, &selectors.image_attributes)),
            })
        })
        .collect();

    Ok(candidates)
}

fn select_all<'a>(document: &'a Html, selector: Option<&Selector>) -> Vec<ElementRef<'a>> {
    selector
        .map(|s| document.select(s).collect())
        .unwrap_or_default()
}

fn text_of(element: &ElementRef) -> String {
    element.text().collect::<String>()
}

/// First non-empty attribute among `attributes`, e.g. lazy-load `data-src` before `src`.
fn image_url(element: &ElementRef, attributes: &[String]) -> Option<String> {
    attributes
        .iter()
        .filter_map(|name| element.value().attr(name))
        .map(str::trim)
        .find(|value| !value.is_empty())
        .map(str::to_string)
}
