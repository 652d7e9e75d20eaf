//! ListProgressHandler - Query handler for a learner's progress records.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::progress::UserProgress;
use crate::ports::ProgressRepository;

#[derive(Debug, Clone)]
pub struct ListProgressQuery {
    pub user_id: UserId,
}

pub type ListProgressResult = Vec<UserProgress>;

#[derive(Debug, Clone, thiserror::Error)]
pub enum ListProgressError {
    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

impl From<DomainError> for ListProgressError {
    fn from(err: DomainError) -> Self {
        ListProgressError::Infrastructure(err.message)
    }
}

pub struct ListProgressHandler {
    repository: Arc<dyn ProgressRepository>,
}

impl ListProgressHandler {
    pub fn new(repository: Arc<dyn ProgressRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: ListProgressQuery) -> Result<ListProgressResult, ListProgressError> {
        Ok(self.repository.list_for_user(&query.user_id).await?)
    }
}
