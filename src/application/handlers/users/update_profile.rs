//! UpdateProfileHandler - Command handler for a user's self-service
//! profile edit.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, UserId, ValidationError};
use crate::domain::user::{ProfileChanges, UserAccount};
use crate::ports::UserDirectory;

/// Command to edit the caller's own profile. Absent fields are kept.
#[derive(Debug, Clone)]
pub struct UpdateProfileCommand {
    pub user_id: UserId,
    pub name: Option<String>,
    pub department: Option<String>,
    pub language: Option<String>,
    pub level: Option<u32>,
}

pub type UpdateProfileResult = UserAccount;

#[derive(Debug, Clone, thiserror::Error)]
pub enum UpdateProfileError {
    #[error("Invalid profile: {0}")]
    Validation(#[from] ValidationError),

    #[error("User not found: {0}")]
    UserNotFound(UserId),

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

impl UpdateProfileError {
    fn from_domain(err: DomainError, user_id: UserId) -> Self {
        match err.code {
            ErrorCode::UserNotFound => UpdateProfileError::UserNotFound(user_id),
            ErrorCode::ValidationFailed => {
                UpdateProfileError::Validation(ValidationError::invalid_format("profile", err.message))
            }
            _ => UpdateProfileError::Infrastructure(err.message),
        }
    }
}

pub struct UpdateProfileHandler {
    directory: Arc<dyn UserDirectory>,
}

impl UpdateProfileHandler {
    pub fn new(directory: Arc<dyn UserDirectory>) -> Self {
        Self { directory }
    }

    pub async fn handle(
        &self,
        cmd: UpdateProfileCommand,
    ) -> Result<UpdateProfileResult, UpdateProfileError> {
        let changes = ProfileChanges::new(cmd.name, cmd.department, cmd.language, cmd.level)?;

        let account = self
            .directory
            .update_profile(&cmd.user_id, &changes)
            .await
            .map_err(|e| UpdateProfileError::from_domain(e, cmd.user_id.clone()))?;

        tracing::info!(
            user_id = %account.id,
            level = account.level.value(),
            "Profile updated"
        );

        Ok(account)
    }
}
