use serde::{Deserialize, Serialize};

use crate::gifts::bank::Gift;
use crate::gifts::domain::AssessmentAttempt;

use super::error::{EngineError, PreconditionError};
use super::scorer::{rank_scores, GiftScores, RankedGift};
use super::{TRAIT_SMOOTHING_ALPHA, TRAIT_WINDOW};

/// Smoothed, multi-attempt view of a user's gift scores. Derived on demand, never stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TraitProfile {
    scores: GiftScores,
}

impl TraitProfile {
    pub fn scores(&self) -> &GiftScores {
        &self.scores
    }

    /// `true` when there is no trait data yet; callers fall back to the latest single attempt.
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn get(&self, gift: Gift) -> Option<f64> {
        self.scores.get(&gift).copied()
    }

    pub fn ranked(&self) -> Vec<RankedGift> {
        rank_scores(&self.scores)
    }

    pub fn top(&self, n: usize) -> Vec<RankedGift> {
        let mut ranked = self.ranked();
        ranked.truncate(n);
        ranked
    }
}

/// Exponentially smooth an oldest-first window of score snapshots.
///
/// The first non-empty snapshot seeds the profile; each later one moves every gift it mentions
/// toward its newest value by `TRAIT_SMOOTHING_ALPHA`. A gift that first appears in a later
/// snapshot is smoothed up from zero.
pub fn aggregate_trait(history: &[GiftScores]) -> Result<TraitProfile, EngineError> {
    if history.len() > TRAIT_WINDOW {
        return Err(PreconditionError::HistoryTooLong {
            len: history.len(),
            max: TRAIT_WINDOW,
        }
        .into());
    }

    let mut smoothed: Option<GiftScores> = None;
    for snapshot in history.iter().filter(|snapshot| !snapshot.is_empty()) {
        smoothed = Some(match smoothed.take() {
            None => snapshot.clone(),
            Some(mut current) => {
                for (&gift, &latest) in snapshot {
                    let previous = current.get(&gift).copied().unwrap_or(0.0);
                    current.insert(
                        gift,
                        (1.0 - TRAIT_SMOOTHING_ALPHA) * previous + TRAIT_SMOOTHING_ALPHA * latest,
                    );
                }
                current
            }
        });
    }

    Ok(TraitProfile {
        scores: smoothed.unwrap_or_default(),
    })
}

/// Smooth stored attempts after checking they are in chronological order.
pub fn aggregate_attempts(history: &[AssessmentAttempt]) -> Result<TraitProfile, EngineError> {
    if let Some(index) = history
        .windows(2)
        .position(|pair| pair[1].recorded_at < pair[0].recorded_at)
    {
        return Err(PreconditionError::HistoryOutOfOrder { index: index + 1 }.into());
    }

    let snapshots: Vec<GiftScores> = history
        .iter()
        .map(|attempt| attempt.result.scores.clone())
        .collect();
    aggregate_trait(&snapshots)
}
