//! ListUsersHandler - Query handler for the user directory.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, DomainError};
use crate::domain::user::UserAccount;
use crate::ports::UserDirectory;

#[derive(Debug, Clone)]
pub struct ListUsersQuery {
    pub requester: AuthenticatedUser,
}

pub type ListUsersResult = Vec<UserAccount>;

#[derive(Debug, Clone, thiserror::Error)]
pub enum ListUsersError {
    #[error("Only managers and authors may list users")]
    Forbidden,

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

impl From<DomainError> for ListUsersError {
    fn from(err: DomainError) -> Self {
        ListUsersError::Infrastructure(err.message)
    }
}

pub struct ListUsersHandler {
    directory: Arc<dyn UserDirectory>,
}

impl ListUsersHandler {
    pub fn new(directory: Arc<dyn UserDirectory>) -> Self {
        Self { directory }
    }

    /// All accounts, newest first. Restricted to managers and authors.
    pub async fn handle(&self, query: ListUsersQuery) -> Result<ListUsersResult, ListUsersError> {
        if !query.requester.can_list_users() {
            return Err(ListUsersError::Forbidden);
        }
        Ok(self.directory.list().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::MockUserDirectory;
    use crate::domain::foundation::{Timestamp, UserId};
    use chrono::{TimeZone, Utc};

    fn requester(role: &str) -> ListUsersQuery {
        ListUsersQuery {
            requester: AuthenticatedUser::new(
                UserId::new("user_yaniv").unwrap(),
                "yaniv@company.com",
                role,
            ),
        }
    }

    fn account(id: &str, day: u32) -> UserAccount {
        let mut account =
            UserAccount::new(UserId::new(id).unwrap(), format!("{}@company.com", id), "LEARNER");
        account.created_at =
            Timestamp::from_datetime(Utc.with_ymd_and_hms(2025, 1, day, 9, 0, 0).unwrap());
        account
    }

    fn directory() -> MockUserDirectory {
        MockUserDirectory::default()
            .with_account(account("user_aya", 2))
            .with_account(account("user_john", 4))
    }

    #[tokio::test]
    async fn manager_sees_newest_first() {
        let handler = ListUsersHandler::new(Arc::new(directory()));

        let users = handler.handle(requester("MANAGER")).await.unwrap();

        let ids: Vec<_> = users.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, vec!["user_john", "user_aya"]);
    }

    #[tokio::test]
    async fn author_may_list() {
        let handler = ListUsersHandler::new(Arc::new(directory()));

        assert_eq!(handler.handle(requester("AUTHOR")).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn learner_is_forbidden() {
        let handler = ListUsersHandler::new(Arc::new(directory()));

        let result = handler.handle(requester("LEARNER")).await;

        assert!(matches!(result, Err(ListUsersError::Forbidden)));
    }

    #[tokio::test]
    async fn storage_outage_is_infrastructure_error() {
        let handler = ListUsersHandler::new(Arc::new(MockUserDirectory::failing()));

        let result = handler.handle(requester("MANAGER")).await;

        assert!(matches!(result, Err(ListUsersError::Infrastructure(_))));
    }
}
