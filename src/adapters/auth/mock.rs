//! Mock session validator for tests and local development.
//!
//! # Example
//!
//! ```ignore
//! use skillpath::adapters::auth::MockSessionValidator;
//! use skillpath::domain::foundation::UserId;
//!
//! let validator = MockSessionValidator::new()
//!     .with_test_user("token-aya", UserId::new("user_aya")?, "AUTHOR");
//! let user = validator.validate("token-aya").await?;
//! ```

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};
use crate::ports::SessionValidator;

/// Maps fixed tokens to users. Tokens not in the map return `InvalidToken`.
#[derive(Debug, Default)]
pub struct MockSessionValidator {
    tokens: RwLock<HashMap<String, AuthenticatedUser>>,
    /// Returned for every validation when set.
    force_error: RwLock<Option<AuthError>>,
}

impl MockSessionValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `token` for `user`.
    pub fn with_user(self, token: impl Into<String>, user: AuthenticatedUser) -> Self {
        self.add_token(token, user);
        self
    }

    /// Registers `token` for a user with the given role and no targeting
    /// claims.
    pub fn with_test_user(
        self,
        token: impl Into<String>,
        user_id: UserId,
        role: impl Into<String>,
    ) -> Self {
        let email = format!("{}@test.example.com", user_id);
        self.with_user(token, AuthenticatedUser::new(user_id, email, role))
    }

    /// Forces all validations to return `error`.
    pub fn with_error(self, error: AuthError) -> Self {
        if let Ok(mut forced) = self.force_error.write() {
            *forced = Some(error);
        }
        self
    }

    pub fn add_token(&self, token: impl Into<String>, user: AuthenticatedUser) {
        if let Ok(mut tokens) = self.tokens.write() {
            tokens.insert(token.into(), user);
        }
    }

    pub fn token_count(&self) -> usize {
        self.tokens.read().map(|t| t.len()).unwrap_or(0)
    }
}

#[async_trait]
impl SessionValidator for MockSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let forced = self
            .force_error
            .read()
            .map_err(|_| AuthError::service_unavailable("mock validator poisoned"))?
            .clone();
        if let Some(error) = forced {
            return Err(error);
        }

        self.tokens
            .read()
            .map_err(|_| AuthError::service_unavailable("mock validator poisoned"))?
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user() -> AuthenticatedUser {
        AuthenticatedUser::new(UserId::new("user_john").unwrap(), "john@company.com", "LEARNER")
            .with_department("IT")
    }

    #[tokio::test]
    async fn returns_user_for_registered_token() {
        let validator = MockSessionValidator::new().with_user("valid-token", test_user());

        let user = validator.validate("valid-token").await.unwrap();

        assert_eq!(user.id.as_str(), "user_john");
        assert_eq!(user.department.as_deref(), Some("IT"));
    }

    #[tokio::test]
    async fn returns_invalid_token_for_unknown() {
        let validator = MockSessionValidator::new();

        let result = validator.validate("unknown-token").await;

        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn with_test_user_sets_role() {
        let validator = MockSessionValidator::new().with_test_user(
            "t",
            UserId::new("user_aya").unwrap(),
            "AUTHOR",
        );

        let user = validator.validate("t").await.unwrap();

        assert!(user.is_author());
        assert!(user.email.contains("user_aya"));
    }

    #[tokio::test]
    async fn with_error_forces_error() {
        let validator = MockSessionValidator::new()
            .with_user("valid-token", test_user())
            .with_error(AuthError::ServiceUnavailable("down".to_string()));

        let result = validator.validate("valid-token").await;

        assert!(matches!(result, Err(AuthError::ServiceUnavailable(_))));
    }

    #[test]
    fn token_count_tracks_tokens() {
        let validator = MockSessionValidator::new()
            .with_test_user("t1", UserId::new("u1").unwrap(), "LEARNER")
            .with_test_user("t2", UserId::new("u2").unwrap(), "LEARNER");

        assert_eq!(validator.token_count(), 2);
    }
}
