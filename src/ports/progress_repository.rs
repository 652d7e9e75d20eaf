//! Progress repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, StepId, UserId};
use crate::domain::progress::UserProgress;

/// Persistence for learner progress, one record per (user, step).
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Find the record for a user and step.
    ///
    /// Returns `None` if the user has no progress on that step yet.
    async fn find(&self, user_id: &UserId, step_id: &StepId)
        -> Result<Option<UserProgress>, DomainError>;

    /// Insert or replace the record for `(progress.user_id, progress.step_id)`.
    async fn save(&self, progress: &UserProgress) -> Result<(), DomainError>;

    /// All records of a user, ordered by step id.
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<UserProgress>, DomainError>;
}
