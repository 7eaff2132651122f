use super::domain::{AssessmentAttempt, UserId};

/// Storage abstraction for finished attempts so the service can be exercised in isolation.
pub trait AttemptRepository: Send + Sync {
    fn insert(&self, attempt: AssessmentAttempt) -> Result<AssessmentAttempt, RepositoryError>;
    /// Up to `limit` attempts for `user_id`, newest `recorded_at` first. Insertion order only
    /// breaks timestamp ties.
    fn recent(
        &self,
        user_id: &UserId,
        limit: usize,
    ) -> Result<Vec<AssessmentAttempt>, RepositoryError>;
    /// Remove every attempt for `user_id`, returning how many were deleted.
    fn delete_for_user(&self, user_id: &UserId) -> Result<usize, RepositoryError>;

    fn latest(&self, user_id: &UserId) -> Result<Option<AssessmentAttempt>, RepositoryError> {
        Ok(self.recent(user_id, 1)?.into_iter().next())
    }
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
