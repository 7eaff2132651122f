use crate::gifts::bank::TIEBREAK_ITEMS_PER_GIFT;

use super::error::{EngineError, PreconditionError};
use super::normalizer::validate_likert;
use super::scorer::GiftResult;
use super::{LIKERT_HALF_RANGE, LIKERT_MIDPOINT, TIEBREAK_BASE_WEIGHT, TIEBREAK_RESPONSE_WEIGHT};

/// Blend tie-break answers into the two candidate gifts and re-rank.
///
/// Only the primary and secondary scores move; every other gift keeps its base score exactly.
/// The returned result never asks for another tie-break, even when the new margin is still
/// small.
pub fn resolve_tie(
    base: &GiftResult,
    primary: &[i32],
    secondary: &[i32],
) -> Result<GiftResult, EngineError> {
    if !base.needs_tiebreak {
        return Err(PreconditionError::TiebreakNotRequired {
            margin: base.margin,
        }
        .into());
    }
    if base.primary == base.secondary {
        return Err(PreconditionError::DuplicateCandidate(base.primary).into());
    }

    validate_likert(
        "primary tie-break responses",
        primary,
        TIEBREAK_ITEMS_PER_GIFT,
    )?;
    validate_likert(
        "secondary tie-break responses",
        secondary,
        TIEBREAK_ITEMS_PER_GIFT,
    )?;

    let mut scores = base.scores.clone();
    for (gift, answers) in [(base.primary, primary), (base.secondary, secondary)] {
        let score = scores
            .get_mut(&gift)
            .ok_or(PreconditionError::MissingCandidate(gift))?;
        *score = blend(*score, answers);
    }

    let mut result = GiftResult::from_scores(scores)?;
    result.needs_tiebreak = false;
    Ok(result)
}

fn blend(base_score: f64, answers: &[i32]) -> f64 {
    let total: i32 = answers.iter().sum();
    let average = f64::from(total) / answers.len() as f64;

    TIEBREAK_BASE_WEIGHT * base_score
        + TIEBREAK_RESPONSE_WEIGHT * ((average - LIKERT_MIDPOINT) / LIKERT_HALF_RANGE)
}
