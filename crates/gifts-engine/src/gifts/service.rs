use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info};

use super::domain::{
    AssessmentAttempt, AssessmentSubmission, TiebreakSubmission, UserId, DEFAULT_LANGUAGE,
};
use super::engine::{aggregate_attempts, EngineError, TRAIT_WINDOW};
use super::flow::{AssessmentFlow, FinalizedAssessment, FlowError, FlowStep, TiebreakPrompt};
use super::report::GiftProfileView;
use super::repository::{AttemptRepository, RepositoryError};

/// Service composing the scoring engine, per-user assessment flow, and attempt storage.
pub struct GiftAssessmentService<R> {
    repository: Arc<R>,
    default_language: String,
    flows: Mutex<HashMap<UserId, AssessmentFlow>>,
}

/// Result of submitting the core questionnaire.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SubmissionOutcome {
    Completed(AssessmentAttempt),
    TiebreakRequired(TiebreakPrompt),
}

impl<R> GiftAssessmentService<R>
where
    R: AttemptRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self::with_default_language(repository, DEFAULT_LANGUAGE)
    }

    pub fn with_default_language(repository: Arc<R>, default_language: impl Into<String>) -> Self {
        Self {
            repository,
            default_language: default_language.into(),
            flows: Mutex::new(HashMap::new()),
        }
    }

    /// Score a core submission, persisting it unless a tie-break is needed first.
    pub fn submit(
        &self,
        user_id: &UserId,
        submission: AssessmentSubmission,
    ) -> Result<SubmissionOutcome, GiftServiceError> {
        let mut flow = self.flow_for(user_id);
        if flow.pending().is_some() {
            debug!(%user_id, "new submission replaces pending tie-break");
        }

        let AssessmentSubmission {
            language,
            responses,
        } = submission;
        let language = language.unwrap_or_else(|| self.default_language.clone());

        match flow.submit_base(language, responses)? {
            FlowStep::Finalized(finalized) => {
                let attempt = self.persist(user_id, finalized)?;
                self.store_flow(user_id, flow);
                Ok(SubmissionOutcome::Completed(attempt))
            }
            FlowStep::TiebreakRequired(prompt) => {
                info!(
                    %user_id,
                    primary = %prompt.primary,
                    secondary = %prompt.secondary,
                    margin = prompt.margin,
                    "top two gifts too close; awaiting tie-break"
                );
                self.store_flow(user_id, flow);
                Ok(SubmissionOutcome::TiebreakRequired(prompt))
            }
        }
    }

    /// Finish a pending attempt with the six tie-break answers.
    pub fn resolve_tiebreak(
        &self,
        user_id: &UserId,
        submission: &TiebreakSubmission,
    ) -> Result<AssessmentAttempt, GiftServiceError> {
        let mut flow = self.flow_for(user_id);
        let finalized = flow.submit_tiebreak(submission).map_err(|err| match err {
            FlowError::NoPendingTiebreak => GiftServiceError::NoPendingTiebreak(user_id.clone()),
            FlowError::Engine(err) => GiftServiceError::Engine(err),
        })?;

        let attempt = self.persist(user_id, finalized)?;
        self.store_flow(user_id, flow);
        Ok(attempt)
    }

    pub fn pending_tiebreak(&self, user_id: &UserId) -> Option<TiebreakPrompt> {
        self.flow_for(user_id)
            .pending()
            .map(|pending| pending.prompt())
    }

    /// Latest attempt summary plus the smoothed trait view across recent retakes.
    pub fn profile(&self, user_id: &UserId) -> Result<Option<GiftProfileView>, GiftServiceError> {
        let mut window = self.repository.recent(user_id, TRAIT_WINDOW)?;
        let Some(latest) = window.first().cloned() else {
            return Ok(None);
        };

        window.reverse();
        let trait_profile = aggregate_attempts(&window)?;
        Ok(Some(GiftProfileView::new(
            &latest,
            &trait_profile,
            window.len(),
        )))
    }

    pub fn latest_attempt(
        &self,
        user_id: &UserId,
    ) -> Result<Option<AssessmentAttempt>, GiftServiceError> {
        Ok(self.repository.latest(user_id)?)
    }

    /// Drop stored attempts and any pending tie-break for `user_id`.
    pub fn clear(&self, user_id: &UserId) -> Result<usize, GiftServiceError> {
        let deleted = self.repository.delete_for_user(user_id)?;
        self.store_flow(user_id, AssessmentFlow::AwaitingBase);
        info!(%user_id, deleted, "cleared gift assessment history");
        Ok(deleted)
    }

    fn persist(
        &self,
        user_id: &UserId,
        finalized: FinalizedAssessment,
    ) -> Result<AssessmentAttempt, GiftServiceError> {
        let FinalizedAssessment {
            language,
            responses,
            result,
            used_tiebreak,
        } = finalized;

        let attempt = AssessmentAttempt::new(
            user_id.clone(),
            Utc::now(),
            language,
            responses,
            result,
            used_tiebreak,
        );
        let stored = self.repository.insert(attempt)?;

        info!(
            %user_id,
            primary = %stored.result.primary,
            secondary = %stored.result.secondary,
            margin = stored.result.margin,
            confidence = %stored.confidence,
            used_tiebreak = stored.used_tiebreak,
            "gift assessment recorded"
        );
        Ok(stored)
    }

    fn flow_for(&self, user_id: &UserId) -> AssessmentFlow {
        self.flows
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(user_id)
            .cloned()
            .unwrap_or_default()
    }

    fn store_flow(&self, user_id: &UserId, flow: AssessmentFlow) {
        let mut flows = self.flows.lock().unwrap_or_else(PoisonError::into_inner);
        match flow {
            AssessmentFlow::AwaitingBase => {
                flows.remove(user_id);
            }
            pending @ AssessmentFlow::AwaitingTiebreak(_) => {
                flows.insert(user_id.clone(), pending);
            }
        }
    }
}

/// Error raised by the assessment service.
#[derive(Debug, thiserror::Error)]
pub enum GiftServiceError {
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error("no tie-break pending for user {0}")]
    NoPendingTiebreak(UserId),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
