//! Spiritual gifts assessment: question bank, scoring engine, and the workflow around it.

pub mod bank;
pub mod domain;
pub mod engine;
pub mod flow;
pub mod import;
pub mod report;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use bank::{Gift, ItemKind, QuestionItem, TiebreakItem};
pub use domain::{AssessmentAttempt, AssessmentSubmission, TiebreakSubmission, UserId};
pub use engine::{
    aggregate_attempts, aggregate_trait, confidence_label, resolve_tie, score, ConfidenceLabel,
    EngineError, GiftResult, GiftScores, InvalidInputError, PreconditionError, RankedGift,
    TraitProfile,
};
pub use flow::{AssessmentFlow, FlowError, FlowStep, TiebreakPrompt};
pub use import::{ResponseSheetError, ResponseSheetImporter};
pub use report::GiftProfileView;
pub use repository::{AttemptRepository, RepositoryError};
pub use router::{gifts_router, QuestionnaireView};
pub use service::{GiftAssessmentService, GiftServiceError, SubmissionOutcome};
