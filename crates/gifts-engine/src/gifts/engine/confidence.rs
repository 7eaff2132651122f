use std::fmt;

use serde::{Deserialize, Serialize};

use super::{HIGH_CONFIDENCE_MARGIN, MEDIUM_CONFIDENCE_MARGIN};

/// Display label for how clearly the primary gift stands apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfidenceLabel {
    Low,
    Medium,
    High,
}

impl ConfidenceLabel {
    pub fn label(self) -> &'static str {
        match self {
            ConfidenceLabel::Low => "Low",
            ConfidenceLabel::Medium => "Medium",
            ConfidenceLabel::High => "High",
        }
    }
}

impl fmt::Display for ConfidenceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a final (post tie-break) margin. Lower bounds are inclusive.
pub fn confidence_label(margin: f64) -> ConfidenceLabel {
    if margin >= HIGH_CONFIDENCE_MARGIN {
        ConfidenceLabel::High
    } else if margin >= MEDIUM_CONFIDENCE_MARGIN {
        ConfidenceLabel::Medium
    } else {
        ConfidenceLabel::Low
    }
}
