//! Two-phase assessment state machine.
//!
//! A user starts in [`AssessmentFlow::AwaitingBase`]. Scoring a base submission either finishes
//! the attempt or parks it in [`AssessmentFlow::AwaitingTiebreak`] until the six follow-up
//! answers arrive. The flow is a plain value owned by the caller; the engine stays stateless.

use serde::Serialize;

use super::bank::{tiebreak_items, Gift, TiebreakItem};
use super::domain::TiebreakSubmission;
use super::engine::{
    confidence_label, resolve_tie, score, ConfidenceLabel, EngineError, GiftResult,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub enum AssessmentFlow {
    #[default]
    AwaitingBase,
    AwaitingTiebreak(PendingTiebreak),
}

/// Base result held while the tie-break questions are outstanding.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingTiebreak {
    language: String,
    responses: Vec<i32>,
    base: GiftResult,
}

impl PendingTiebreak {
    pub fn base(&self) -> &GiftResult {
        &self.base
    }

    pub fn prompt(&self) -> TiebreakPrompt {
        TiebreakPrompt {
            primary: self.base.primary,
            secondary: self.base.secondary,
            margin: self.base.margin,
            primary_items: tiebreak_items(self.base.primary).collect(),
            secondary_items: tiebreak_items(self.base.secondary).collect(),
        }
    }
}

/// What the presentation layer needs to ask the tie-break questions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TiebreakPrompt {
    pub primary: Gift,
    pub secondary: Gift,
    pub margin: f64,
    pub primary_items: Vec<TiebreakItem>,
    pub secondary_items: Vec<TiebreakItem>,
}

/// A finished attempt that has not yet been stamped with a user and timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct FinalizedAssessment {
    pub language: String,
    pub responses: Vec<i32>,
    pub result: GiftResult,
    pub used_tiebreak: bool,
}

impl FinalizedAssessment {
    pub fn confidence(&self) -> ConfidenceLabel {
        confidence_label(self.result.margin)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FlowStep {
    Finalized(FinalizedAssessment),
    TiebreakRequired(TiebreakPrompt),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FlowError {
    #[error("no tie-break is pending; submit the core questionnaire first")]
    NoPendingTiebreak,
    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl AssessmentFlow {
    pub fn pending(&self) -> Option<&PendingTiebreak> {
        match self {
            AssessmentFlow::AwaitingBase => None,
            AssessmentFlow::AwaitingTiebreak(pending) => Some(pending),
        }
    }

    /// Score a core submission. A new submission replaces any tie-break still pending; an
    /// invalid one leaves the flow untouched.
    pub fn submit_base(
        &mut self,
        language: String,
        responses: Vec<i32>,
    ) -> Result<FlowStep, EngineError> {
        let base = score(&responses)?;

        if base.needs_tiebreak {
            let pending = PendingTiebreak {
                language,
                responses,
                base,
            };
            let prompt = pending.prompt();
            *self = AssessmentFlow::AwaitingTiebreak(pending);
            Ok(FlowStep::TiebreakRequired(prompt))
        } else {
            *self = AssessmentFlow::AwaitingBase;
            Ok(FlowStep::Finalized(FinalizedAssessment {
                language,
                responses,
                result: base,
                used_tiebreak: false,
            }))
        }
    }

    /// Resolve the pending tie-break. Invalid answers keep the pending state so the caller can
    /// ask again.
    pub fn submit_tiebreak(
        &mut self,
        submission: &TiebreakSubmission,
    ) -> Result<FinalizedAssessment, FlowError> {
        let result = match self {
            AssessmentFlow::AwaitingBase => return Err(FlowError::NoPendingTiebreak),
            AssessmentFlow::AwaitingTiebreak(pending) => {
                resolve_tie(&pending.base, &submission.primary, &submission.secondary)?
            }
        };

        match std::mem::take(self) {
            AssessmentFlow::AwaitingTiebreak(pending) => Ok(FinalizedAssessment {
                language: pending.language,
                responses: pending.responses,
                result,
                used_tiebreak: true,
            }),
            AssessmentFlow::AwaitingBase => Err(FlowError::NoPendingTiebreak),
        }
    }
}
