//! End-to-end runs of the tip pipeline against a mock tip site.

use betting_tips::{fetch_todays_tips, Config, FeaturedStatus, HttpPageSource, TipFormat};
use chrono::NaiveDate;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
}

fn card(date: &str, href: &str) -> String {
    format!(
        r#"<div class="card-body">
            <h4 class="card-title"><a href="{}">Tipp</a></h4>
            <div><span class="preview-label">Datum:</span><span class="preview-data">{}</span></div>
        </div>"#,
        href, date
    )
}

fn standard_tip(title: &str, statement: &str, date: &str) -> String {
    format!(
        r#"<html><body>
            <h1 class="entry-title">{}</h1>
            <div class="tip-details">
                <div class="tip-details__tip fancy-title">{}</div>
                <div><span class="details-label">Wettbewerb</span><span class="details-data">Bundesliga</span></div>
                <div><span class="details-label">Datum</span><span class="details-data">{}</span></div>
                <div><span class="details-label">Einsatz</span><span class="details-data">6/10</span></div>
            </div>
        </body></html>"#,
        title, statement, date
    )
}

const ESPORTS_TIP: &str = r#"<html><body>
    <h1 class="entry-title">G2 – Fnatic Tipp</h1>
    <div class="valueTip"><div class="valueTip__tip fancy-title">G2 zu Sieg zu 1.95</div></div>
    <h2>G2 vs. Fnatic beste Quoten * 16.10.2026</h2>
    <table class="bonus-table"><tr><td>LEC</td><td>18:00 Uhr </td></tr></table>
</body></html>"#;

async fn mount(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

async fn tip_site() -> MockServer {
    let server = MockServer::start().await;

    mount(
        &server,
        "/tipps/page/1",
        format!(
            "<html><body>{}{}{}{}</body></html>",
            card("16.10.2026", "/tipps/bayern-vs-dortmund-tipp"),
            card("16.10.2026", "/tipps/g2-fnatic-tipp"),
            card("15.10.2026", "/tipps/yesterday-tipp"),
            card("18.10.2026", "/tipps/weekend-tipp"),
        ),
    )
    .await;
    mount(
        &server,
        "/tipps/page/2",
        format!(
            "<html><body>{}</body></html>",
            card("14.10.2026", "/tipps/old-tipp")
        ),
    )
    .await;

    mount(
        &server,
        "/tipps/bayern-vs-dortmund-tipp",
        standard_tip(
            "Bayern vs. Dortmund Tipp",
            "Über 3.5 Tore zu Quote 2.05",
            "16.10.2026, 20:30 Uhr",
        ),
    )
    .await;
    mount(&server, "/tipps/g2-fnatic-tipp", ESPORTS_TIP.to_string()).await;
    mount(
        &server,
        "/tipps/weekend-tipp",
        standard_tip(
            "Leipzig vs. Köln Tipp",
            "Sieg Leipzig zu Quote 1.55",
            "18.10.2026, 15:30 Uhr",
        ),
    )
    .await;

    mount(
        &server,
        "/promo",
        r#"<html><body><div class="row sportwetten-news-up">
            <div class="cta-footer"><a href="/tipps/featured-tipp">Zum Tipp</a></div>
        </div></body></html>"#
            .to_string(),
    )
    .await;
    mount(
        &server,
        "/tipps/featured-tipp",
        standard_tip(
            "Celtic vs. Rangers Tipp",
            "Beide treffen zu Quote 1.70",
            "16.10.2026, 21:00 Uhr",
        ),
    )
    .await;

    server
}

fn config(server: &MockServer) -> Config {
    Config {
        index_url: format!("{}/tipps", server.uri()),
        featured_url: format!("{}/promo", server.uri()),
        ..Config::default()
    }
}

#[tokio::test]
async fn test_full_run_merges_filters_and_orders() {
    let server = tip_site().await;
    let config = config(&server);
    let source = HttpPageSource::new(&config).unwrap();

    let report = fetch_todays_tips(&source, &config, today()).await.unwrap();

    assert_eq!(report.pages_visited, 2);
    assert_eq!(report.links_found, 3);
    assert_eq!(report.parsed, 3);
    assert_eq!(report.skipped, 0);
    assert_eq!(report.featured, FeaturedStatus::Appended);

    let teams: Vec<&str> = report.fixtures.iter().map(|f| f.team_a.as_str()).collect();
    // Featured first, then by kick-off; the weekend tip is outside the window
    assert_eq!(teams, vec!["Celtic", "G2", "Bayern"]);

    assert_eq!(report.fixtures[0].comment.as_deref(), Some("Bet of the Day"));
    assert_eq!(report.fixtures[1].format, TipFormat::Esports);
    assert_eq!(report.fixtures[1].tip_text, "G2 zu Sieg");
    assert_eq!(report.fixtures[2].league.as_deref(), Some("Bundesliga"));
    assert!(report.fixtures[2].comment.is_none());
}

#[tokio::test]
async fn test_featured_tip_already_listed_is_not_duplicated() {
    let server = tip_site().await;
    let config = config(&server);
    // Point the promo teaser at a tip from the listing
    Mock::given(method("GET"))
        .and(path("/promo-listed"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<div class="row sportwetten-news-up"><div class="cta-footer">
                <a href="/tipps/bayern-vs-dortmund-tipp">Zum Tipp</a></div></div>"#,
        ))
        .mount(&server)
        .await;
    let config = Config {
        featured_url: format!("{}/promo-listed", server.uri()),
        ..config
    };
    let source = HttpPageSource::new(&config).unwrap();

    let report = fetch_todays_tips(&source, &config, today()).await.unwrap();

    assert_eq!(report.featured, FeaturedStatus::Matched);
    assert_eq!(report.fixtures.len(), 2);
    assert_eq!(report.fixtures[0].team_a, "Bayern");
    assert!(report.fixtures[0].comment.is_some());
}

#[tokio::test]
async fn test_missing_featured_page_does_not_stop_run() {
    let server = tip_site().await;
    let config = Config {
        featured_url: format!("{}/no-promo", server.uri()),
        ..config(&server)
    };
    let source = HttpPageSource::new(&config).unwrap();

    let report = fetch_todays_tips(&source, &config, today()).await.unwrap();

    assert_eq!(report.featured, FeaturedStatus::Unavailable);
    let teams: Vec<&str> = report.fixtures.iter().map(|f| f.team_a.as_str()).collect();
    assert_eq!(teams, vec!["G2", "Bayern"]);
}

#[tokio::test]
async fn test_identical_content_gives_identical_output() {
    let server = tip_site().await;
    let config = config(&server);
    let source = HttpPageSource::new(&config).unwrap();

    let first = fetch_todays_tips(&source, &config, today()).await.unwrap();
    let second = fetch_todays_tips(&source, &config, today()).await.unwrap();

    assert_eq!(first.fixtures, second.fixtures);
}

#[tokio::test]
async fn test_unreachable_index_is_an_error() {
    let server = MockServer::start().await;
    let config = config(&server);
    let source = HttpPageSource::new(&config).unwrap();

    assert!(fetch_todays_tips(&source, &config, today()).await.is_err());
}
