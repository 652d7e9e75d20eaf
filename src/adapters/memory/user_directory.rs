//! In-memory user directory.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::adapters::seed::{ContentSeed, SeedError};
use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::user::{ProfileChanges, UserAccount};
use crate::ports::UserDirectory;

#[derive(Debug, Clone, Default)]
pub struct InMemoryUserDirectory {
    accounts: Arc<RwLock<HashMap<UserId, UserAccount>>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_accounts(accounts: impl IntoIterator<Item = UserAccount>) -> Self {
        let accounts = accounts.into_iter().map(|a| (a.id.clone(), a)).collect();
        Self {
            accounts: Arc::new(RwLock::new(accounts)),
        }
    }

    pub fn from_seed(seed: &ContentSeed) -> Result<Self, SeedError> {
        Ok(Self::with_accounts(seed.accounts()?))
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find(&self, user_id: &UserId) -> Result<Option<UserAccount>, DomainError> {
        Ok(self.accounts.read().await.get(user_id).cloned())
    }

    async fn list(&self) -> Result<Vec<UserAccount>, DomainError> {
        let mut accounts: Vec<_> = self.accounts.read().await.values().cloned().collect();
        accounts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(accounts)
    }

    async fn update_profile(
        &self,
        user_id: &UserId,
        changes: &ProfileChanges,
    ) -> Result<UserAccount, DomainError> {
        let mut accounts = self.accounts.write().await;
        let account = accounts.get_mut(user_id).ok_or_else(|| {
            DomainError::new(ErrorCode::UserNotFound, format!("User not found: {}", user_id))
        })?;

        changes.apply(account);
        Ok(account.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;
    use chrono::{TimeZone, Utc};

    fn account(id: &str, day: u32) -> UserAccount {
        let mut account =
            UserAccount::new(UserId::new(id).unwrap(), format!("{}@company.com", id), "LEARNER");
        account.created_at =
            Timestamp::from_datetime(Utc.with_ymd_and_hms(2025, 1, day, 9, 0, 0).unwrap());
        account
    }

    #[tokio::test]
    async fn list_is_newest_first_with_ties_by_id() {
        let directory = InMemoryUserDirectory::with_accounts(vec![
            account("user_b", 1),
            account("user_c", 3),
            account("user_a", 1),
        ]);

        let ids: Vec<_> = directory
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.id.to_string())
            .collect();

        assert_eq!(ids, vec!["user_c", "user_a", "user_b"]);
    }

    #[tokio::test]
    async fn update_profile_is_persisted() {
        let directory = InMemoryUserDirectory::with_accounts(vec![account("user_a", 1)]);
        let id = UserId::new("user_a").unwrap();

        let changes = ProfileChanges::new(Some("Aya".into()), None, None, Some(2)).unwrap();

        let updated = directory.update_profile(&id, &changes).await.unwrap();

        assert_eq!(updated.name.as_deref(), Some("Aya"));
        assert_eq!(directory.find(&id).await.unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn concurrent_edits_of_different_fields_are_all_kept() {
        let directory = InMemoryUserDirectory::with_accounts(vec![account("user_a", 1)]);
        let id = UserId::new("user_a").unwrap();
        let name = ProfileChanges::new(Some("Aya".into()), None, None, None).unwrap();
        let department = ProfileChanges::new(None, Some("IT".into()), None, None).unwrap();

        let (first, second) = tokio::join!(
            directory.update_profile(&id, &name),
            directory.update_profile(&id, &department),
        );
        first.unwrap();
        second.unwrap();

        let stored = directory.find(&id).await.unwrap().unwrap();
        assert_eq!(stored.name.as_deref(), Some("Aya"));
        assert_eq!(stored.department.as_deref(), Some("IT"));
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let directory = InMemoryUserDirectory::new();

        let err = directory
            .update_profile(&UserId::new("user_x").unwrap(), &ProfileChanges::default())
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::UserNotFound);
    }

    #[tokio::test]
    async fn demo_seed_populates_directory() {
        let directory = InMemoryUserDirectory::from_seed(&ContentSeed::demo().unwrap()).unwrap();

        let accounts = directory.list().await.unwrap();

        assert_eq!(accounts.len(), 4);
        assert_eq!(accounts[0].id.as_str(), "user_john");
        assert_eq!(accounts[3].id.as_str(), "user_oria");
    }
}
