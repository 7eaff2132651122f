use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::gifts::bank::{items_for, Gift};
use crate::gifts::domain::{AssessmentAttempt, UserId};
use crate::gifts::repository::{AttemptRepository, RepositoryError};
use crate::gifts::router::gifts_router;
use crate::gifts::service::GiftAssessmentService;

/// Every answer set to `rest`, except the five items of each listed gift.
pub(super) fn responses_with(rest: i32, overrides: &[(Gift, [i32; 5])]) -> Vec<i32> {
    let mut responses = vec![rest; 50];
    for (gift, answers) in overrides {
        for (item, answer) in items_for(*gift).zip(answers) {
            responses[item.index] = *answer;
        }
    }
    responses
}

/// One gift answered at the top of the scale, everything else at the bottom.
pub(super) fn dominant(gift: Gift) -> Vec<i32> {
    responses_with(1, &[(gift, [5; 5])])
}

/// Two gifts answered identically, giving an exact score tie.
pub(super) fn dead_heat(first: Gift, second: Gift) -> Vec<i32> {
    responses_with(1, &[(first, [5; 5]), (second, [5; 5])])
}

/// Mercy edges out Teaching by roughly 0.057, well inside the tie-break threshold.
pub(super) fn near_tie() -> Vec<i32> {
    responses_with(
        1,
        &[
            (Gift::Teaching, [4, 5, 5, 5, 5]),
            (Gift::Mercy, [5, 5, 5, 5, 4]),
        ],
    )
}

/// Teaching leads Mercy by one fruit point (1/7 ≈ 0.143), just past the tie-break threshold.
pub(super) fn narrow_lead() -> Vec<i32> {
    responses_with(
        1,
        &[
            (Gift::Teaching, [5, 5, 5, 5, 5]),
            (Gift::Mercy, [5, 5, 5, 5, 4]),
        ],
    )
}

pub(super) fn user(id: &str) -> UserId {
    UserId(id.to_string())
}

#[derive(Default)]
pub(super) struct MemoryRepository {
    attempts: Mutex<Vec<AssessmentAttempt>>,
}

impl MemoryRepository {
    pub(super) fn stored(&self) -> Vec<AssessmentAttempt> {
        self.attempts.lock().expect("repository mutex poisoned").clone()
    }
}

impl AttemptRepository for MemoryRepository {
    fn insert(&self, attempt: AssessmentAttempt) -> Result<AssessmentAttempt, RepositoryError> {
        self.attempts
            .lock()
            .expect("repository mutex poisoned")
            .push(attempt.clone());
        Ok(attempt)
    }

    fn recent(
        &self,
        user_id: &UserId,
        limit: usize,
    ) -> Result<Vec<AssessmentAttempt>, RepositoryError> {
        let guard = self.attempts.lock().expect("repository mutex poisoned");
        let mut history: Vec<AssessmentAttempt> = guard
            .iter()
            .rev()
            .filter(|attempt| &attempt.user_id == user_id)
            .cloned()
            .collect();
        history.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
        history.truncate(limit);
        Ok(history)
    }

    fn delete_for_user(&self, user_id: &UserId) -> Result<usize, RepositoryError> {
        let mut guard = self.attempts.lock().expect("repository mutex poisoned");
        let before = guard.len();
        guard.retain(|attempt| &attempt.user_id != user_id);
        Ok(before - guard.len())
    }
}

pub(super) struct UnavailableRepository;

impl AttemptRepository for UnavailableRepository {
    fn insert(&self, _attempt: AssessmentAttempt) -> Result<AssessmentAttempt, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn recent(
        &self,
        _user_id: &UserId,
        _limit: usize,
    ) -> Result<Vec<AssessmentAttempt>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn delete_for_user(&self, _user_id: &UserId) -> Result<usize, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn build_service() -> (
    Arc<GiftAssessmentService<MemoryRepository>>,
    Arc<MemoryRepository>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let service = Arc::new(GiftAssessmentService::new(repository.clone()));
    (service, repository)
}

pub(super) fn router_with_service(
    service: Arc<GiftAssessmentService<MemoryRepository>>,
) -> axum::Router {
    gifts_router(service)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) async fn read_text_body(response: Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    String::from_utf8(body.to_vec()).expect("utf-8 body")
}
