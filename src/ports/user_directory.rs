//! User directory port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::{ProfileChanges, UserAccount};

/// Registered users and their editable profile attributes.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Returns `None` if no account has this id.
    async fn find(&self, user_id: &UserId) -> Result<Option<UserAccount>, DomainError>;

    /// Every account, newest first. Accounts created at the same instant
    /// are ordered by id.
    async fn list(&self) -> Result<Vec<UserAccount>, DomainError>;

    /// Applies `changes` to the account and returns the stored result.
    ///
    /// Reading and writing the account is one atomic step, so concurrent
    /// edits of different fields are all kept.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if no account has this id
    async fn update_profile(
        &self,
        user_id: &UserId,
        changes: &ProfileChanges,
    ) -> Result<UserAccount, DomainError>;
}
