use super::{read_labeled_field, resolve_link, selector, FieldLayout, ScrapeError};
use crate::api::PageSource;
use chrono::NaiveDate;
use scraper::Html;
use std::collections::HashSet;
use tracing::{debug, info, warn};

const CARD_DATE_FORMAT: &str = "%d.%m.%Y";

/// Result of walking the paginated tip index
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CrawlOutcome {
    /// Tip links in listing order, without duplicates
    pub links: Vec<String>,
    /// Index pages requested, including the one that ended the crawl
    pub pages_visited: u32,
    /// Index pages that were actually retrieved
    pub pages_fetched: u32,
}

/// Walks `{index}/page/1`, `{index}/page/2`, ... collecting links to current tips.
///
/// The crawl stops at the first page that contributes no new current tip:
/// every card on it is dated before today or was already listed, it has no
/// cards, or it could not be fetched. Listings are newest first, so later
/// pages are not fetched.
pub struct TipLinkCollector<'a, S> {
    source: &'a S,
    max_pages: Option<u32>,
}

impl<'a, S: PageSource> TipLinkCollector<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self {
            source,
            max_pages: None,
        }
    }

    pub fn with_max_pages(mut self, max_pages: Option<u32>) -> Self {
        self.max_pages = max_pages;
        self
    }

    pub async fn collect(&self, base_index_url: &str, today: NaiveDate) -> CrawlOutcome {
        let mut outcome = CrawlOutcome::default();
        let mut seen = HashSet::new();

        for page in 1.. {
            if self.max_pages.is_some_and(|max| page > max) {
                info!(max_pages = ?self.max_pages, "Reached page limit");
                break;
            }

            let url = page_url(base_index_url, page);
            outcome.pages_visited += 1;
            debug!(url = %url, "Getting tips");

            let html = match self.source.fetch(&url).await {
                Ok(html) => html,
                Err(e) => {
                    warn!(url = %url, error = %e, "Could not fetch index page");
                    break;
                }
            };
            outcome.pages_fetched += 1;

            let links = match parse_index_html(&html, &url, today) {
                Ok(links) => links,
                Err(e) => {
                    warn!(url = %url, error = %e, "Could not read index page");
                    break;
                }
            };

            if links.is_empty() {
                debug!(page, "No current tips on page, stopping");
                break;
            }

            let before = outcome.links.len();
            for link in links {
                if seen.insert(link.clone()) {
                    outcome.links.push(link);
                }
            }

            if outcome.links.len() == before {
                warn!(url = %url, "Index page only repeats earlier tips, stopping");
                break;
            }
        }

        outcome
    }
}

pub fn page_url(base_index_url: &str, page: u32) -> String {
    format!("{}/page/{}", base_index_url.trim_end_matches('/'), page)
}

/// Links of all cards on one index page that are dated today or later.
/// Cards without a date label are taken as current.
pub fn parse_index_html(
    html: &str,
    page_url: &str,
    today: NaiveDate,
) -> Result<Vec<String>, ScrapeError> {
    let document = Html::parse_document(html);
    let card_selector = selector("div.card-body")?;
    let link_selector = selector("h4.card-title a[href]")?;
    let layout = FieldLayout::preview()?;

    let mut links = Vec::new();

    for card in document.select(&card_selector) {
        if let Some(date_text) = read_labeled_field(card, &layout, "Datum") {
            match NaiveDate::parse_from_str(&date_text, CARD_DATE_FORMAT) {
                Ok(date) if date < today => continue,
                Ok(_) => {}
                Err(e) => {
                    warn!(page_url, date = %date_text, error = %e, "Skipping card with unreadable date");
                    continue;
                }
            }
        }

        let Some(href) = card
            .select(&link_selector)
            .next()
            .and_then(|anchor| anchor.value().attr("href"))
        else {
            warn!(page_url, "Skipping card without tip link");
            continue;
        };

        links.push(resolve_link(page_url, href));
    }

    Ok(links)
}
