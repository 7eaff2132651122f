//! Pure scoring engine for the spiritual gifts questionnaire.
//!
//! Every operation here is a free function over caller-owned values: nothing is cached, logged,
//! or shared between calls, so the functions are safe to invoke concurrently. The two-phase
//! assessment (base score, then an optional tie-break) is sequenced by the caller; see
//! [`crate::gifts::flow`].

mod confidence;
mod error;
mod normalizer;
mod scorer;
mod tiebreak;
mod trait_profile;

pub use confidence::{confidence_label, ConfidenceLabel};
pub use error::{EngineError, InvalidInputError, PreconditionError};
pub use normalizer::center_responses;
pub use scorer::{normalized_weights, score, subtype_weight, GiftResult, GiftScores, RankedGift};
pub use tiebreak::resolve_tie;
pub use trait_profile::{aggregate_attempts, aggregate_trait, TraitProfile};

/// Item sub-type weights. Behavior is the most reliable signal, fruit the least.
pub const BURDEN_WEIGHT: f64 = 0.35;
pub const BEHAVIOR_WEIGHT: f64 = 0.40;
pub const FRUIT_WEIGHT: f64 = 0.25;

/// A base result whose top-two margin falls below this value must go through a tie-break.
pub const TIEBREAK_MARGIN_THRESHOLD: f64 = 0.12;

/// Share of the base score kept when blending in tie-break answers.
pub const TIEBREAK_BASE_WEIGHT: f64 = 0.7;
/// Share of the re-centered tie-break average blended into the base score.
pub const TIEBREAK_RESPONSE_WEIGHT: f64 = 0.3;
/// Midpoint and half-range of the 1..=5 scale, used to map an average onto [-1, 1].
pub const LIKERT_MIDPOINT: f64 = 3.0;
pub const LIKERT_HALF_RANGE: f64 = 2.0;

/// Margins at or above these bounds are reported as high / medium confidence.
pub const HIGH_CONFIDENCE_MARGIN: f64 = 0.35;
pub const MEDIUM_CONFIDENCE_MARGIN: f64 = 0.20;

/// Exponential smoothing factor applied to each newer attempt in the trait window.
pub const TRAIT_SMOOTHING_ALPHA: f64 = 0.30;
/// Maximum number of past attempts folded into a trait profile.
pub const TRAIT_WINDOW: usize = 5;
