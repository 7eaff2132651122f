use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::engine::{confidence_label, ConfidenceLabel, GiftResult};

/// Language tag recorded when the caller does not supply one.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Identifier wrapper for the person taking the assessment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub String);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Completed core questionnaire as submitted by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentSubmission {
    /// Language the questions were shown in; the service default applies when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    pub responses: Vec<i32>,
}

impl AssessmentSubmission {
    pub fn new(responses: Vec<i32>) -> Self {
        Self {
            language: None,
            responses,
        }
    }

    pub fn in_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }
}

/// Answers to the six tie-break items, three per candidate gift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TiebreakSubmission {
    pub primary: Vec<i32>,
    pub secondary: Vec<i32>,
}

/// One finished assessment, stored once and superseded (never merged) by later attempts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentAttempt {
    pub user_id: UserId,
    pub recorded_at: DateTime<Utc>,
    pub language: String,
    pub raw_responses: Vec<i32>,
    pub result: GiftResult,
    pub used_tiebreak: bool,
    pub confidence: ConfidenceLabel,
}

impl AssessmentAttempt {
    pub fn new(
        user_id: UserId,
        recorded_at: DateTime<Utc>,
        language: String,
        raw_responses: Vec<i32>,
        result: GiftResult,
        used_tiebreak: bool,
    ) -> Self {
        let confidence = confidence_label(result.margin);
        Self {
            user_id,
            recorded_at,
            language,
            raw_responses,
            result,
            used_tiebreak,
            confidence,
        }
    }
}
