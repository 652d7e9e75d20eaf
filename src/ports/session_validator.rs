//! Session validation port for bearer token validation.
//!
//! Provider-agnostic: the HS256 JWT validator and the test mock both
//! implement it.
//!
//! All implementations MUST check:
//! - **Signature**: token was issued by a trusted party
//! - **Expiry (exp)**: token must not be expired

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Validates access tokens and extracts the caller's identity and
/// targeting claims.
///
/// # Contract
///
/// Implementations must:
/// - Return `AuthError::InvalidToken` for malformed or badly signed tokens
/// - Return `AuthError::TokenExpired` for expired tokens
/// - Return `AuthError::ServiceUnavailable` for transient errors
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Validate a raw token (without the "Bearer " prefix).
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;
    use std::collections::HashMap;
    use std::sync::RwLock;

    struct TestSessionValidator {
        tokens: RwLock<HashMap<String, AuthenticatedUser>>,
    }

    impl TestSessionValidator {
        fn new() -> Self {
            Self {
                tokens: RwLock::new(HashMap::new()),
            }
        }

        fn add_valid_token(&self, token: &str, user: AuthenticatedUser) {
            self.tokens.write().unwrap().insert(token.to_string(), user);
        }
    }

    #[async_trait]
    impl SessionValidator for TestSessionValidator {
        async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
            self.tokens
                .read()
                .unwrap()
                .get(token)
                .cloned()
                .ok_or(AuthError::InvalidToken)
        }
    }

    #[tokio::test]
    async fn returns_user_for_known_token() {
        let validator = TestSessionValidator::new();
        validator.add_valid_token(
            "token-john",
            AuthenticatedUser::new(UserId::new("user_john").unwrap(), "john@company.com", "IT")
                .with_language("english")
                .with_level(2),
        );

        let user = validator.validate("token-john").await.unwrap();

        assert_eq!(user.id.as_str(), "user_john");
        assert_eq!(user.level, Some(2));
    }

    #[tokio::test]
    async fn rejects_unknown_token() {
        let validator = TestSessionValidator::new();
        let result = validator.validate("nope").await;
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[test]
    fn session_validator_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn SessionValidator>();
    }
}
