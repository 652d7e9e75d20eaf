//! Authentication types for the domain layer.
//!
//! These types represent an authenticated user extracted from a bearer
//! token. They have **no external dependencies** - any token validator can
//! populate them via the `SessionValidator` port.
//!
//! The targeting attributes (role, department, language, level) are kept
//! as the raw claim values here; `LearnerProfile::from_user` normalizes
//! them for variant resolution.

use super::UserId;
use thiserror::Error;

/// Role granted authoring rights.
pub const ROLE_AUTHOR: &str = "AUTHOR";

/// Role granted read access to the user directory.
pub const ROLE_MANAGER: &str = "MANAGER";

/// Default role for self-registered users.
pub const ROLE_LEARNER: &str = "LEARNER";

/// Authenticated user extracted from a validated token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// The unique user identifier.
    pub id: UserId,

    /// User's email address from the token claims.
    pub email: String,

    /// Role claim (`LEARNER`, `MANAGER`, `AUTHOR` or a department-as-role).
    pub role: String,

    /// Department code claim, if any.
    pub department: Option<String>,

    /// Preferred language claim, if any.
    pub language: Option<String>,

    /// Knowledge level claim, if any.
    pub level: Option<u32>,
}

impl AuthenticatedUser {
    /// Creates a new authenticated user with only identity and role.
    ///
    /// Targeting claims can be added with the `with_*` builders.
    pub fn new(id: UserId, email: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
            role: role.into(),
            department: None,
            language: None,
            level: None,
        }
    }

    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.level = Some(level);
        self
    }

    /// Returns true if the user's role is one of `roles`.
    pub fn has_any_role(&self, roles: &[&str]) -> bool {
        roles.iter().any(|r| *r == self.role)
    }

    /// Returns true if the user may use the authoring endpoints.
    pub fn is_author(&self) -> bool {
        self.has_any_role(&[ROLE_AUTHOR])
    }

    /// Returns true if the user may browse the user directory.
    pub fn can_list_users(&self) -> bool {
        self.has_any_role(&[ROLE_MANAGER, ROLE_AUTHOR])
    }
}

/// Authentication errors that can occur during token validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The token is missing, malformed, or has an invalid signature.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// The token has expired (separate from InvalidToken for specific handling).
    #[error("Token expired")]
    TokenExpired,

    /// User exists but lacks required permissions for this action.
    #[error("Insufficient permissions")]
    InsufficientPermissions,

    /// The authentication service is unavailable (config, key material, etc.).
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    /// Creates a service unavailable error with a message.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if this error indicates the user should re-authenticate.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(self, AuthError::InvalidToken | AuthError::TokenExpired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user(role: &str) -> AuthenticatedUser {
        AuthenticatedUser::new(UserId::new("user_aya").unwrap(), "aya@company.com", role)
    }

    #[test]
    fn authenticated_user_new_has_no_targeting_claims() {
        let user = test_user(ROLE_LEARNER);

        assert_eq!(user.id.as_str(), "user_aya");
        assert_eq!(user.role, "LEARNER");
        assert!(user.department.is_none());
        assert!(user.language.is_none());
        assert!(user.level.is_none());
    }

    #[test]
    fn builders_set_targeting_claims() {
        let user = test_user(ROLE_LEARNER)
            .with_department("marketing")
            .with_language("hebrew")
            .with_level(2);

        assert_eq!(user.department.as_deref(), Some("marketing"));
        assert_eq!(user.language.as_deref(), Some("hebrew"));
        assert_eq!(user.level, Some(2));
    }

    #[test]
    fn only_authors_are_authors() {
        assert!(test_user(ROLE_AUTHOR).is_author());
        assert!(!test_user(ROLE_MANAGER).is_author());
        assert!(!test_user(ROLE_LEARNER).is_author());
    }

    #[test]
    fn managers_and_authors_list_users() {
        assert!(test_user(ROLE_MANAGER).can_list_users());
        assert!(test_user(ROLE_AUTHOR).can_list_users());
        assert!(!test_user(ROLE_LEARNER).can_list_users());
        assert!(!test_user("IT").can_list_users());
    }

    #[test]
    fn has_any_role_matches_exactly() {
        let user = test_user(ROLE_MANAGER);
        assert!(user.has_any_role(&[ROLE_MANAGER, ROLE_AUTHOR]));
        assert!(!user.has_any_role(&["manager"]));
    }

    #[test]
    fn auth_error_requires_reauthentication_for_token_errors() {
        assert!(AuthError::InvalidToken.requires_reauthentication());
        assert!(AuthError::TokenExpired.requires_reauthentication());
        assert!(!AuthError::InsufficientPermissions.requires_reauthentication());
        assert!(!AuthError::service_unavailable("").requires_reauthentication());
    }

    #[test]
    fn auth_error_service_unavailable_displays_message() {
        let err = AuthError::service_unavailable("missing secret");
        assert_eq!(format!("{}", err), "Auth service unavailable: missing secret");
    }
}
