pub mod featured;
pub mod tip_links;
pub mod tip_page;

pub use featured::*;
pub use tip_links::*;
pub use tip_page::*;

use crate::api::FetchError;
use scraper::{ElementRef, Selector};
use thiserror::Error;

/// Reasons a page could not be turned into data
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("invalid selector: {0}")]
    Selector(String),

    #[error("missing element: {0}")]
    MissingElement(&'static str),

    #[error("missing field: {0}")]
    MissingField(&'static str),

    #[error("malformed tip statement: {0:?}")]
    MalformedTip(String),

    #[error("invalid odds: {0:?}")]
    InvalidOdds(String),

    #[error("invalid date {value:?}: {source}")]
    InvalidDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

pub(crate) fn selector(css: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(css).map_err(|_| ScrapeError::Selector(css.to_string()))
}

/// All text below an element with runs of whitespace collapsed to one space
pub(crate) fn element_text(element: &ElementRef<'_>) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Resolve an href against the page it was found on
pub(crate) fn resolve_link(page_url: &str, href: &str) -> String {
    url::Url::parse(page_url)
        .and_then(|base| base.join(href))
        .map(String::from)
        .unwrap_or_else(|_| href.to_string())
}

/// Markup used for "label: value" pairs, where both spans share a parent
pub struct FieldLayout {
    label: Selector,
    data: Selector,
}

impl FieldLayout {
    pub fn new(label_css: &str, data_css: &str) -> Result<Self, ScrapeError> {
        Ok(Self {
            label: selector(label_css)?,
            data: selector(data_css)?,
        })
    }

    /// Fields on listing cards
    pub fn preview() -> Result<Self, ScrapeError> {
        Self::new("span.preview-label", "span.preview-data")
    }

    /// Fields in the tip details panel
    pub fn details() -> Result<Self, ScrapeError> {
        Self::new("span.details-label", "span.details-data")
    }
}

/// Find the label inside `scope` whose text contains `label` and read the
/// value span next to it.
pub fn read_labeled_field(scope: ElementRef<'_>, layout: &FieldLayout, label: &str) -> Option<String> {
    let label_element = scope
        .select(&layout.label)
        .find(|element| element_text(element).contains(label))?;

    let parent = label_element.parent().and_then(ElementRef::wrap)?;
    let data = parent.select(&layout.data).next()?;

    Some(element_text(&data))
}
