pub mod api;
pub mod config;
pub mod models;
pub mod scrapers;
pub mod utils;

pub use api::*;
pub use config::*;
pub use models::*;
pub use scrapers::*;
pub use utils::*;

use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

/// Today's tips plus what it took to get them
#[derive(Debug, Clone, Serialize)]
pub struct TipsReport {
    pub fixtures: Vec<Fixture>,
    pub pages_visited: u32,
    pub links_found: usize,
    pub parsed: usize,
    pub skipped: usize,
    pub featured: FeaturedStatus,
}

/// Crawl the tip listing, parse every tip, merge the bet of the day and
/// return today's tips in display order.
///
/// Only an unreachable first index page is an error; individual pages that
/// fail are skipped.
pub async fn fetch_todays_tips<S: PageSource>(
    source: &S,
    config: &Config,
    today: NaiveDate,
) -> Result<TipsReport> {
    let crawl = TipLinkCollector::new(source)
        .with_max_pages(config.max_pages)
        .collect(&config.index_url, today)
        .await;

    if crawl.pages_fetched == 0 {
        anyhow::bail!("Tip index {} is unreachable", config.index_url);
    }
    info!(
        links = crawl.links.len(),
        pages = crawl.pages_visited,
        "Collected tip links"
    );

    let parser = TipParser::new(source);
    let mut fixtures = Vec::with_capacity(crawl.links.len());
    for link in &crawl.links {
        if let Some(fixture) = parser.parse(link).await {
            fixtures.push(fixture);
        }
    }
    let parsed = fixtures.len();
    info!(parsed, skipped = crawl.links.len() - parsed, "Parsed tips");

    let (fixtures, featured) = if config.skip_featured {
        let fixtures = aggregate(&parser, fixtures, None, today).await.0;
        (fixtures, FeaturedStatus::Disabled)
    } else {
        let featured_link = FeaturedTipResolver::new(source)
            .resolve(&config.featured_url)
            .await;
        aggregate(&parser, fixtures, featured_link.as_deref(), today).await
    };

    Ok(TipsReport {
        fixtures,
        pages_visited: crawl.pages_visited,
        links_found: crawl.links.len(),
        parsed,
        skipped: crawl.links.len() - parsed,
        featured,
    })
}
