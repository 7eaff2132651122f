use chrono::{DateTime, Utc};
use serde::Serialize;

use super::bank::Gift;
use super::domain::{AssessmentAttempt, UserId};
use super::engine::{ConfidenceLabel, RankedGift, TraitProfile};

/// Number of gifts highlighted in summaries and the printable report.
pub const SUMMARY_GIFT_COUNT: usize = 3;

const REPORT_TITLE: &str = "Tukuza Yesu Spiritual Gifts Report";
const REPORT_NOTE: [&str; 2] = [
    "This assessment identifies edification gifts for serving and building up the body of Christ.",
    "It does not determine fivefold office calling.",
];
const REPORT_FOOTER: &str = "Built with faith by Sammy Karuri | Tukuza Yesu AI Toolkit";

/// Read model combining the latest attempt with the stable trait view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GiftProfileView {
    pub user_id: UserId,
    pub recorded_at: DateTime<Utc>,
    pub language: String,
    pub primary: Gift,
    pub secondary: Gift,
    pub margin: f64,
    pub confidence: ConfidenceLabel,
    pub used_tiebreak: bool,
    pub top_gifts: Vec<RankedGift>,
    /// Empty until at least one attempt has been stored.
    pub trait_top_gifts: Vec<RankedGift>,
    pub attempts_in_trait_window: usize,
}

impl GiftProfileView {
    pub fn new(
        latest: &AssessmentAttempt,
        trait_profile: &TraitProfile,
        attempts_in_trait_window: usize,
    ) -> Self {
        Self {
            user_id: latest.user_id.clone(),
            recorded_at: latest.recorded_at,
            language: latest.language.clone(),
            primary: latest.result.primary,
            secondary: latest.result.secondary,
            margin: latest.result.margin,
            confidence: latest.confidence,
            used_tiebreak: latest.used_tiebreak,
            top_gifts: latest.result.top(SUMMARY_GIFT_COUNT).to_vec(),
            trait_top_gifts: trait_profile.top(SUMMARY_GIFT_COUNT),
            attempts_in_trait_window,
        }
    }

    /// Plain-text report suitable for download.
    pub fn render_text(&self, user_name: &str) -> String {
        let mut lines = vec![
            REPORT_TITLE.to_string(),
            String::new(),
            format!("User Name: {user_name}"),
            String::new(),
            format!("Primary Gift: {}", self.primary),
            format!("Secondary Gift: {}", self.secondary),
            format!("Confidence: {} (margin: {:.3})", self.confidence, self.margin),
        ];
        if self.used_tiebreak {
            lines.push("Tie-break: applied".to_string());
        }

        lines.push(String::new());
        lines.push(format!("Top {SUMMARY_GIFT_COUNT}:"));
        lines.extend(numbered(&self.top_gifts, "score"));

        if !self.trait_top_gifts.is_empty() {
            lines.push(String::new());
            lines.push(format!(
                "Stable Trait Top {SUMMARY_GIFT_COUNT} (across {} retake(s)):",
                self.attempts_in_trait_window
            ));
            lines.extend(numbered(&self.trait_top_gifts, "trait"));
        }

        lines.push(String::new());
        lines.push("Note:".to_string());
        lines.extend(REPORT_NOTE.iter().map(|line| line.to_string()));
        lines.push(String::new());
        lines.push(REPORT_FOOTER.to_string());

        lines.join("\n")
    }
}

fn numbered<'a>(entries: &'a [RankedGift], label: &'a str) -> impl Iterator<Item = String> + 'a {
    entries
        .iter()
        .enumerate()
        .map(move |(i, entry)| format!("{}. {} ({label}: {:.3})", i + 1, entry.gift, entry.score))
}
