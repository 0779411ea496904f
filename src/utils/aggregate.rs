use crate::api::PageSource;
use crate::models::Fixture;
use crate::scrapers::TipParser;
use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;
use std::cmp::Ordering;
use tracing::{debug, info};

/// Hour on the following day up to which a tip still counts as today's
const CUTOFF_HOUR: u32 = 10;

/// How the featured tip ended up in the result set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FeaturedStatus {
    /// Already among the collected tips and flagged in place
    Matched,
    /// Parsed separately and added to the collection
    Appended,
    /// Link found but its page could not be parsed, or no link at all
    Unavailable,
    /// Lookup switched off
    Disabled,
}

/// Flag the fixture whose link equals `link`. Returns false when none matches.
pub fn mark_featured(fixtures: &mut [Fixture], link: &str) -> bool {
    match fixtures.iter_mut().find(|fixture| fixture.link == link) {
        Some(fixture) => {
            fixture.mark_featured();
            true
        }
        None => false,
    }
}

/// Merge the featured tip into `fixtures`, parsing its page when it was not
/// part of the crawl.
pub async fn merge_featured<S: PageSource>(
    parser: &TipParser<'_, S>,
    fixtures: &mut Vec<Fixture>,
    featured_link: Option<&str>,
) -> FeaturedStatus {
    let Some(link) = featured_link else {
        return FeaturedStatus::Unavailable;
    };

    if mark_featured(fixtures, link) {
        debug!(link, "Bet of the day already collected");
        return FeaturedStatus::Matched;
    }

    match parser.parse(link).await {
        Some(mut fixture) => {
            fixture.mark_featured();
            fixtures.push(fixture);
            info!(link, "Added bet of the day from outside the listing");
            FeaturedStatus::Appended
        }
        None => FeaturedStatus::Unavailable,
    }
}

/// Latest kick-off still shown for `today`: 10:00 on the next day
pub fn window_cutoff(today: NaiveDate) -> NaiveDateTime {
    let cutoff = NaiveTime::from_hms_opt(CUTOFF_HOUR, 0, 0).expect("cutoff hour is a valid time");
    (today + Days::new(1)).and_time(cutoff)
}

pub fn filter_window(fixtures: Vec<Fixture>, today: NaiveDate) -> Vec<Fixture> {
    let cutoff = window_cutoff(today);
    fixtures
        .into_iter()
        .filter(|fixture| fixture.date_time <= cutoff)
        .collect()
}

/// Featured tips first, everything else by kick-off time
pub fn compare_fixtures(a: &Fixture, b: &Fixture) -> Ordering {
    b.is_featured()
        .cmp(&a.is_featured())
        .then_with(|| a.date_time.cmp(&b.date_time))
}

/// Stable, so fixtures with equal keys keep collection order
pub fn order_fixtures(fixtures: &mut [Fixture]) {
    fixtures.sort_by(compare_fixtures);
}

/// Merge the featured tip, keep today's window and order for display
pub async fn aggregate<S: PageSource>(
    parser: &TipParser<'_, S>,
    mut fixtures: Vec<Fixture>,
    featured_link: Option<&str>,
    today: NaiveDate,
) -> (Vec<Fixture>, FeaturedStatus) {
    let status = merge_featured(parser, &mut fixtures, featured_link).await;

    let mut todays = filter_window(fixtures, today);
    order_fixtures(&mut todays);

    (todays, status)
}
