/// Listing index the crawl starts from; pages live under `{index}/page/{n}`
pub const DEFAULT_INDEX_URL: &str = "https://www.wettbasis.com/sportwetten-tipps";

/// Page carrying the "bet of the day" teaser
pub const DEFAULT_FEATURED_URL: &str = "https://www.wettbasis.com/sportwetten-tipps";

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings for one scraping run
#[derive(Debug, Clone)]
pub struct Config {
    pub index_url: String,
    pub featured_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    /// Hard stop for the pagination crawl, on top of the stale-page rule
    pub max_pages: Option<u32>,
    /// Skip the featured tip lookup entirely
    pub skip_featured: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            index_url: DEFAULT_INDEX_URL.to_string(),
            featured_url: DEFAULT_FEATURED_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_pages: None,
            skip_featured: false,
        }
    }
}
