use anyhow::{Context, Result};
use betting_tips::config::{
    Config, DEFAULT_FEATURED_URL, DEFAULT_INDEX_URL, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT,
};
use betting_tips::{fetch_todays_tips, render, HttpPageSource, OutputFormat};
use chrono::Local;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Today's betting tips, collected from the tip listing
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Tip listing to crawl; pages are fetched from `<url>/page/<n>`
    #[arg(long, env = "TIPS_INDEX_URL", default_value = DEFAULT_INDEX_URL)]
    index_url: String,

    /// Page carrying the bet of the day
    #[arg(long, env = "TIPS_FEATURED_URL", default_value = DEFAULT_FEATURED_URL)]
    featured_url: String,

    #[arg(long, env = "TIPS_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    user_agent: String,

    /// Per-request timeout in seconds
    #[arg(long, env = "TIPS_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Stop crawling the listing after this many pages
    #[arg(long, env = "TIPS_MAX_PAGES", value_parser = clap::value_parser!(u32).range(1..))]
    max_pages: Option<u32>,

    /// Don't look up the bet of the day
    #[arg(long)]
    no_featured: bool,

    #[arg(long, value_enum, default_value = "table")]
    format: OutputFormat,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Self {
            index_url: args.index_url,
            featured_url: args.featured_url,
            user_agent: args.user_agent,
            timeout_secs: args.timeout_secs,
            max_pages: args.max_pages,
            skip_featured: args.no_featured,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Diagnostics go to stderr so stdout only carries the report
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let format = args.format;
    let config = Config::from(args);

    let source = HttpPageSource::new(&config)?;
    let today = Local::now().date_naive();

    let report = fetch_todays_tips(&source, &config, today)
        .await
        .context("Failed to fetch tips")?;

    info!(
        pages = report.pages_visited,
        links = report.links_found,
        parsed = report.parsed,
        skipped = report.skipped,
        featured = ?report.featured,
        shown = report.fixtures.len(),
        "Run finished"
    );

    render(&report.fixtures, format, std::io::stdout().lock())?;

    Ok(())
}
