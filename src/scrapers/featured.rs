use super::{resolve_link, selector, ScrapeError};
use crate::api::PageSource;
use scraper::Html;
use tracing::{debug, warn};

/// Looks up the "bet of the day" teaser on the promotional page
pub struct FeaturedTipResolver<'a, S> {
    source: &'a S,
}

impl<'a, S: PageSource> FeaturedTipResolver<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Link to today's featured tip, or `None` when it cannot be found
    pub async fn resolve(&self, featured_url: &str) -> Option<String> {
        debug!(url = featured_url, "Getting bet of the day");

        let result = match self.source.fetch(featured_url).await {
            Ok(html) => parse_featured_html(&html, featured_url),
            Err(e) => Err(e.into()),
        };

        match result {
            Ok(link) => Some(link),
            Err(e) => {
                warn!(url = featured_url, error = %e, "Could not get bet of the day");
                None
            }
        }
    }
}

/// Call-to-action link of the news panel on the promotional page
pub fn parse_featured_html(html: &str, page_url: &str) -> Result<String, ScrapeError> {
    let document = Html::parse_document(html);
    let panel_selector = selector("div.row.sportwetten-news-up")?;
    let link_selector = selector("div.cta-footer a[href]")?;

    let panel = document
        .select(&panel_selector)
        .next()
        .ok_or(ScrapeError::MissingElement("div.sportwetten-news-up"))?;

    let href = panel
        .select(&link_selector)
        .next()
        .and_then(|anchor| anchor.value().attr("href"))
        .ok_or(ScrapeError::MissingElement("div.cta-footer a[href]"))?;

    Ok(resolve_link(page_url, href))
}
