use crate::models::Fixture;
use anyhow::{Context, Result};
use std::io::Write;

const COLUMNS: [&str; 8] = [
    "Date", "Fixture", "Tip", "Odds", "Stake", "League", "Comment", "Link",
];

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Table,
    Csv,
    Json,
}

/// Display cells for one fixture; absent values become empty strings
fn cells(fixture: &Fixture) -> [String; 8] {
    [
        fixture.date_time.format(DATE_FORMAT).to_string(),
        fixture.matchup(),
        fixture.tip_text.clone(),
        fixture.odds.to_string(),
        fixture.stake.clone().unwrap_or_default(),
        fixture.league.clone().unwrap_or_default(),
        fixture.comment.clone().unwrap_or_default(),
        fixture.link.clone(),
    ]
}

/// Render fixtures as a bordered text table
pub fn render_table(fixtures: &[Fixture]) -> String {
    let rows: Vec<[String; 8]> = fixtures.iter().map(cells).collect();

    let mut widths = COLUMNS.map(|header| header.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let border = widths
        .iter()
        .map(|width| "-".repeat(width + 2))
        .collect::<Vec<_>>()
        .join("+");
    let border = format!("+{}+\n", border);

    let line = |values: &[String]| {
        let padded = values
            .iter()
            .zip(&widths)
            .map(|(value, width)| {
                let padding = width - value.chars().count();
                format!(" {}{} ", value, " ".repeat(padding))
            })
            .collect::<Vec<_>>()
            .join("|");
        format!("|{}|\n", padded)
    };

    let mut table = border.clone();
    table.push_str(&line(&COLUMNS.map(String::from)[..]));
    table.push_str(&border);
    for row in &rows {
        table.push_str(&line(&row[..]));
    }
    if !rows.is_empty() {
        table.push_str(&border);
    }

    table
}

/// Write fixtures as CSV with a header row
pub fn write_csv<W: Write>(fixtures: &[Fixture], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record(COLUMNS)
        .context("Failed to write CSV header")?;
    for fixture in fixtures {
        csv_writer
            .write_record(cells(fixture))
            .context("Failed to write CSV row")?;
    }

    csv_writer.flush().context("Failed to flush CSV output")?;
    Ok(())
}

pub fn render_json(fixtures: &[Fixture]) -> Result<String> {
    serde_json::to_string_pretty(fixtures).context("Failed to serialize fixtures")
}

/// Write fixtures in the requested format
pub fn render<W: Write>(fixtures: &[Fixture], format: OutputFormat, mut writer: W) -> Result<()> {
    match format {
        OutputFormat::Table => writer
            .write_all(render_table(fixtures).as_bytes())
            .context("Failed to write table")?,
        OutputFormat::Csv => write_csv(fixtures, &mut writer)?,
        OutputFormat::Json => writeln!(writer, "{}", render_json(fixtures)?)
            .context("Failed to write JSON")?,
    }

    Ok(())
}
