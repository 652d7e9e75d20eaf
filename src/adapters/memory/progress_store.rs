//! In-memory progress repository.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, StepId, UserId};
use crate::domain::progress::UserProgress;
use crate::ports::ProgressRepository;

/// Progress records keyed by `(user, step)`; the ordered map keeps each
/// user's records sorted by step id.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProgressRepository {
    records: Arc<RwLock<BTreeMap<(UserId, StepId), UserProgress>>>,
}

impl InMemoryProgressRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProgressRepository for InMemoryProgressRepository {
    async fn find(
        &self,
        user_id: &UserId,
        step_id: &StepId,
    ) -> Result<Option<UserProgress>, DomainError> {
        Ok(self
            .records
            .read()
            .await
            .get(&(user_id.clone(), step_id.clone()))
            .cloned())
    }

    async fn save(&self, progress: &UserProgress) -> Result<(), DomainError> {
        self.records.write().await.insert(
            (progress.user_id.clone(), progress.step_id.clone()),
            progress.clone(),
        );
        Ok(())
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<UserProgress>, DomainError> {
        Ok(self
            .records
            .read()
            .await
            .values()
            .filter(|p| &p.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Percentage;
    use crate::domain::progress::{ProgressStatus, ProgressUpdate};

    fn progress(user: &str, step: &str, percent: u8) -> UserProgress {
        UserProgress::create(
            UserId::new(user).unwrap(),
            StepId::new(step).unwrap(),
            &ProgressUpdate {
                status: Some(ProgressStatus::InProgress),
                progress_percent: Some(Percentage::try_new(percent).unwrap()),
                last_screen: None,
            },
        )
    }

    #[tokio::test]
    async fn save_replaces_existing_record() {
        let repo = InMemoryProgressRepository::new();
        repo.save(&progress("user_aya", "word_v1", 50)).await.unwrap();
        repo.save(&progress("user_aya", "word_v1", 100)).await.unwrap();

        let found = repo
            .find(&UserId::new("user_aya").unwrap(), &StepId::new("word_v1").unwrap())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(found.progress_percent.value(), 100);
        assert_eq!(
            repo.list_for_user(&UserId::new("user_aya").unwrap()).await.unwrap().len(),
            1
        );
    }

    #[tokio::test]
    async fn list_is_scoped_to_user_and_ordered_by_step() {
        let repo = InMemoryProgressRepository::new();
        repo.save(&progress("user_aya", "word_v1", 100)).await.unwrap();
        repo.save(&progress("user_john", "word_v1", 75)).await.unwrap();
        repo.save(&progress("user_aya", "word_h1", 10)).await.unwrap();

        let records = repo.list_for_user(&UserId::new("user_aya").unwrap()).await.unwrap();

        let steps: Vec<_> = records.iter().map(|p| p.step_id.as_str()).collect();
        assert_eq!(steps, vec!["word_h1", "word_v1"]);
    }
}
