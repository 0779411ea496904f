use super::{element_text, read_labeled_field, selector, FieldLayout, ScrapeError};
use crate::api::PageSource;
use crate::models::{Fixture, TipFormat};
use chrono::NaiveDateTime;
use scraper::{ElementRef, Html};
use tracing::{debug, warn};

const STANDARD_DATE_FORMAT: &str = "%d.%m.%Y, %H:%M Uhr";
const ESPORTS_DATE_FORMAT: &str = "%d.%m.%Y%H:%M";

const STANDARD_ODDS_MARKER: &str = " zu Quote";
const ESPORTS_ODDS_MARKER: &str = "zu ";

/// Everything a tip page yields apart from the title and link
#[derive(Debug)]
struct TipDetails {
    date_time: NaiveDateTime,
    tip_text: String,
    odds: f64,
    league: Option<String>,
    stake: Option<String>,
    format: TipFormat,
}

/// Turns a single tip page into a [`Fixture`]
pub struct TipParser<'a, S> {
    source: &'a S,
}

impl<'a, S: PageSource> TipParser<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Fetch and parse a tip page. Failures are logged and yield `None`.
    pub async fn parse(&self, link: &str) -> Option<Fixture> {
        match self.try_parse(link).await {
            Ok(fixture) => {
                debug!(link, format = ?fixture.format, "Parsed tip");
                Some(fixture)
            }
            Err(e) => {
                warn!(link, error = %e, "Could not scrape tip");
                None
            }
        }
    }

    async fn try_parse(&self, link: &str) -> Result<Fixture, ScrapeError> {
        let html = self.source.fetch(link).await?;
        parse_tip_html(&html, link)
    }
}

/// Extract a fixture from a tip page, trying the standard layout first and
/// the e-sports layout when the page has no tip details panel.
pub fn parse_tip_html(html: &str, link: &str) -> Result<Fixture, ScrapeError> {
    let document = Html::parse_document(html);

    let title_selector = selector("h1.entry-title")?;
    let title = document
        .select(&title_selector)
        .next()
        .map(|element| element_text(&element))
        .ok_or(ScrapeError::MissingElement("h1.entry-title"))?;
    let (team_a, team_b) = split_teams(&title);

    let details_selector = selector("div.tip-details")?;
    let details = match document.select(&details_selector).next() {
        Some(panel) => parse_standard(&document, panel)?,
        None => parse_esports(&document)?,
    };

    Ok(Fixture {
        date_time: details.date_time,
        team_a,
        team_b,
        tip_text: details.tip_text,
        odds: details.odds,
        league: details.league,
        stake: details.stake,
        link: link.to_string(),
        comment: None,
        format: details.format,
    })
}

fn parse_standard(document: &Html, panel: ElementRef<'_>) -> Result<TipDetails, ScrapeError> {
    let statement_selector = selector("div.tip-details__tip.fancy-title")?;
    let statement = document
        .select(&statement_selector)
        .next()
        .map(|element| element_text(&element))
        .ok_or(ScrapeError::MissingElement("div.tip-details__tip"))?;
    let (tip_text, odds) = split_statement(&statement, STANDARD_ODDS_MARKER)?;

    let layout = FieldLayout::details()?;
    let field = |label: &'static str| {
        read_labeled_field(panel, &layout, label).ok_or(ScrapeError::MissingField(label))
    };

    let league = field("Wettbewerb")?;
    let date_time = parse_date_time(&field("Datum")?, STANDARD_DATE_FORMAT)?;
    let stake = field("Einsatz")?;

    Ok(TipDetails {
        date_time,
        tip_text,
        odds,
        league: Some(league),
        stake: Some(stake),
        format: TipFormat::Standard,
    })
}

fn parse_esports(document: &Html) -> Result<TipDetails, ScrapeError> {
    let panel_selector = selector("div.valueTip")?;
    let panel = document
        .select(&panel_selector)
        .next()
        .ok_or(ScrapeError::MissingElement("div.tip-details or div.valueTip"))?;

    let statement_selector = selector("div.valueTip__tip.fancy-title")?;
    let statement = panel
        .select(&statement_selector)
        .next()
        .map(|element| element_text(&element))
        .ok_or(ScrapeError::MissingElement("div.valueTip__tip"))?;
    // The tip itself may contain "zu ", so the odds follow the last one
    let (tip_text, odds) = split_statement(&statement, ESPORTS_ODDS_MARKER)?;

    let heading_selector = selector("h2")?;
    let heading = document
        .select(&heading_selector)
        .map(|element| element_text(&element))
        .find(|text| text.contains("beste Quoten"))
        .ok_or(ScrapeError::MissingElement("h2 containing \"beste Quoten\""))?;
    let date = heading
        .split_once("beste Quoten")
        .and_then(|(_, rest)| rest.split_once(" * "))
        .map(|(_, date)| date.trim().to_string())
        .ok_or(ScrapeError::MissingField("event date"))?;

    let table_selector = selector("table.bonus-table")?;
    let cell_selector = selector("td")?;
    let table = document
        .select(&table_selector)
        .next()
        .ok_or(ScrapeError::MissingElement("table.bonus-table"))?;
    let time = table
        .select(&cell_selector)
        .map(|cell| cell.text().collect::<String>())
        .find_map(|text| {
            text.find(" Uhr ")
                .map(|index| text[..index].trim().to_string())
        })
        .ok_or(ScrapeError::MissingField("kick-off time"))?;

    let date_time = parse_date_time(&format!("{}{}", date, time), ESPORTS_DATE_FORMAT)?;

    Ok(TipDetails {
        date_time,
        tip_text,
        odds,
        league: None,
        stake: None,
        format: TipFormat::Esports,
    })
}

/// Split a page title like "Team A vs. Team B Tipp" into both team names.
/// Titles without a separator or without the " Tipp" suffix are kept whole
/// as the first team.
pub fn split_teams(title: &str) -> (String, Option<String>) {
    let separator = [" vs.", " –"]
        .iter()
        .filter_map(|sep| title.find(sep).map(|index| (index, sep.len())))
        .min_by_key(|(index, _)| *index);

    let Some((index, len)) = separator else {
        return (title.to_string(), None);
    };

    let team_a = title[..index].trim();
    let rest = title[index + len..].trim();
    let Some(end) = rest.find(" Tipp") else {
        return (title.to_string(), None);
    };
    let team_b = rest[..end].trim();

    if team_a.is_empty() || team_b.is_empty() {
        return (title.to_string(), None);
    }

    (team_a.to_string(), Some(team_b.to_string()))
}

/// Split "<tip> <marker> <odds>" on the last occurrence of the marker
fn split_statement(statement: &str, marker: &str) -> Result<(String, f64), ScrapeError> {
    let index = statement
        .rfind(marker)
        .ok_or_else(|| ScrapeError::MalformedTip(statement.to_string()))?;

    let tip_text = statement[..index].trim();
    if tip_text.is_empty() {
        return Err(ScrapeError::MalformedTip(statement.to_string()));
    }

    let odds = parse_odds(&statement[index + marker.len()..])?;
    Ok((tip_text.to_string(), odds))
}

/// Parse decimal odds, accepting a comma as decimal separator
pub fn parse_odds(raw: &str) -> Result<f64, ScrapeError> {
    let odds = raw
        .trim()
        .replace(',', ".")
        .parse::<f64>()
        .map_err(|_| ScrapeError::InvalidOdds(raw.trim().to_string()))?;

    if !odds.is_finite() || odds <= 0.0 {
        return Err(ScrapeError::InvalidOdds(raw.trim().to_string()));
    }

    Ok(odds)
}

fn parse_date_time(value: &str, format: &str) -> Result<NaiveDateTime, ScrapeError> {
    NaiveDateTime::parse_from_str(value.trim(), format).map_err(|source| ScrapeError::InvalidDate {
        value: value.to_string(),
        source,
    })
}
