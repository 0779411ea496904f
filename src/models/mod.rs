use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Comment attached to the tip highlighted on the promotional page
pub const FEATURED_MARKER: &str = "Bet of the Day";

/// Page layout a fixture was extracted from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TipFormat {
    Standard,
    Esports,
}

/// A single betting tip for one scheduled event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    pub date_time: NaiveDateTime,
    pub team_a: String,
    pub team_b: Option<String>,
    pub tip_text: String,
    pub odds: f64,              // Decimal odds, always finite and > 0
    pub league: Option<String>, // Not published for e-sports tips
    pub stake: Option<String>,  // Not published for e-sports tips
    pub link: String,
    pub comment: Option<String>,
    pub format: TipFormat,
}

impl Fixture {
    pub fn is_featured(&self) -> bool {
        self.comment.as_deref() == Some(FEATURED_MARKER)
    }

    /// Flag this fixture as the featured tip. The comment is only ever set once.
    pub fn mark_featured(&mut self) {
        if self.comment.is_none() {
            self.comment = Some(FEATURED_MARKER.to_string());
        }
    }

    /// "Team A vs Team B", with an empty second half when the title could not be split
    pub fn matchup(&self) -> String {
        format!("{} vs {}", self.team_a, self.team_b.as_deref().unwrap_or(""))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn fixture() -> Fixture {
        Fixture {
            date_time: NaiveDate::from_ymd_opt(2026, 10, 16)
                .unwrap()
                .and_hms_opt(18, 30, 0)
                .unwrap(),
            team_a: "Bayern".to_string(),
            team_b: None,
            tip_text: "Sieg Bayern".to_string(),
            odds: 1.5,
            league: None,
            stake: None,
            link: "https://example.com/tip".to_string(),
            comment: None,
            format: TipFormat::Esports,
        }
    }

    #[test]
    fn test_mark_featured_sets_comment_once() {
        let mut tip = fixture();
        assert!(!tip.is_featured());

        tip.mark_featured();
        assert!(tip.is_featured());

        tip.comment = Some("edited".to_string());
        tip.mark_featured();
        assert_eq!(tip.comment.as_deref(), Some("edited"));
    }

    #[test]
    fn test_matchup_without_second_team() {
        assert_eq!(fixture().matchup(), "Bayern vs ");
    }
}
