use gifts_engine::gifts::{AssessmentAttempt, AttemptRepository, RepositoryError, UserId};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Attempt history per user in insertion order; `recent` re-orders by `recorded_at`.
#[derive(Default, Clone)]
pub(crate) struct InMemoryAttemptRepository {
    attempts: Arc<Mutex<HashMap<UserId, Vec<AssessmentAttempt>>>>,
}

impl AttemptRepository for InMemoryAttemptRepository {
    fn insert(&self, attempt: AssessmentAttempt) -> Result<AssessmentAttempt, RepositoryError> {
        let mut guard = self.attempts.lock().expect("repository mutex poisoned");
        guard
            .entry(attempt.user_id.clone())
            .or_default()
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
            .get(user_id)
            .map(|history| history.iter().rev().cloned().collect())
            .unwrap_or_default();
        history.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
        history.truncate(limit);
        Ok(history)
    }

    fn delete_for_user(&self, user_id: &UserId) -> Result<usize, RepositoryError> {
        let mut guard = self.attempts.lock().expect("repository mutex poisoned");
        Ok(guard.remove(user_id).map_or(0, |history| history.len()))
    }
}

impl InMemoryAttemptRepository {
    pub(crate) fn count(&self, user_id: &UserId) -> usize {
        self.attempts
            .lock()
            .expect("repository mutex poisoned")
            .get(user_id)
            .map_or(0, Vec::len)
    }
}
