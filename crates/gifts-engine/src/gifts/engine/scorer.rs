use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::gifts::bank::{items_for, Gift, ItemKind, ITEMS_PER_GIFT};

use super::error::{EngineError, PreconditionError};
use super::normalizer::center_responses;
use super::{BEHAVIOR_WEIGHT, BURDEN_WEIGHT, FRUIT_WEIGHT, TIEBREAK_MARGIN_THRESHOLD};

/// Score per gift. Centered inputs make negative scores ordinary.
pub type GiftScores = BTreeMap<Gift, f64>;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankedGift {
    pub gift: Gift,
    pub score: f64,
}

/// Ranked outcome of one scoring pass.
///
/// `ranked` is non-increasing by score, `primary`/`secondary` mirror its first two entries, and
/// `margin` is their difference (never negative).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GiftResult {
    pub scores: GiftScores,
    pub ranked: Vec<RankedGift>,
    pub primary: Gift,
    pub secondary: Gift,
    pub margin: f64,
    pub needs_tiebreak: bool,
}

impl GiftResult {
    /// Rank `scores` and flag the result for a tie-break when the top two are too close.
    pub(crate) fn from_scores(scores: GiftScores) -> Result<Self, PreconditionError> {
        let ranked = rank_scores(&scores);
        let (first, second) = match (ranked.first(), ranked.get(1)) {
            (Some(first), Some(second)) => (*first, *second),
            _ => {
                return Err(PreconditionError::TooFewGifts {
                    count: ranked.len(),
                })
            }
        };
        let margin = first.score - second.score;

        Ok(Self {
            scores,
            ranked,
            primary: first.gift,
            secondary: second.gift,
            margin,
            needs_tiebreak: margin < TIEBREAK_MARGIN_THRESHOLD,
        })
    }

    /// The `n` highest-ranked gifts.
    pub fn top(&self, n: usize) -> &[RankedGift] {
        &self.ranked[..n.min(self.ranked.len())]
    }

    pub fn score_of(&self, gift: Gift) -> Option<f64> {
        self.scores.get(&gift).copied()
    }
}

/// Score a full 50-answer core response vector.
pub fn score(responses: &[i32]) -> Result<GiftResult, EngineError> {
    let centered = center_responses(responses)?;

    let scores: GiftScores = Gift::ALL
        .iter()
        .map(|&gift| (gift, weighted_average(&centered, gift)))
        .collect();

    Ok(GiftResult::from_scores(scores)?)
}

pub fn subtype_weight(kind: ItemKind) -> f64 {
    match kind {
        ItemKind::Burden => BURDEN_WEIGHT,
        ItemKind::Behavior => BEHAVIOR_WEIGHT,
        ItemKind::Fruit => FRUIT_WEIGHT,
    }
}

/// Effective per-item weights for `gift`, in item order. Always sums to 1.0.
pub fn normalized_weights(gift: Gift) -> [f64; ITEMS_PER_GIFT] {
    let mut weights = [0.0; ITEMS_PER_GIFT];
    for (slot, item) in weights.iter_mut().zip(items_for(gift)) {
        *slot = subtype_weight(item.kind);
    }

    let sum: f64 = weights.iter().sum();
    if sum > 0.0 {
        for weight in &mut weights {
            *weight /= sum;
        }
    }
    weights
}

fn weighted_average(centered: &[f64], gift: Gift) -> f64 {
    let (total, weight_sum) = items_for(gift).fold((0.0, 0.0), |(total, weight_sum), item| {
        let weight = subtype_weight(item.kind);
        (total + centered[item.index] * weight, weight_sum + weight)
    });

    if weight_sum > 0.0 {
        total / weight_sum
    } else {
        0.0
    }
}

/// Sort descending by score. The sort is stable and starts from declaration order, so exact
/// ties resolve to the gift declared first.
pub(crate) fn rank_scores(scores: &GiftScores) -> Vec<RankedGift> {
    let mut ranked: Vec<RankedGift> = scores
        .iter()
        .map(|(&gift, &score)| RankedGift { gift, score })
        .collect();
    ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    ranked
}
