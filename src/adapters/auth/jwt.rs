//! HS256 JWT adapter for bearer token validation.
//!
//! Validates the token signature against a shared secret, checks expiry
//! with a configurable leeway, and maps the identity and targeting claims
//! onto an `AuthenticatedUser`.

use async_trait::async_trait;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};
use crate::ports::SessionValidator;

/// Claims carried by a SkillPath access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    #[serde(rename = "userId")]
    pub user_id: String,

    pub email: String,

    pub role: String,

    /// Department code, used for department targeting.
    #[serde(default, rename = "dept_code", skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,

    #[serde(
        default,
        rename = "language_preference",
        skip_serializing_if = "Option::is_none"
    )]
    pub language: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,

    /// Expiry timestamp (Unix epoch seconds).
    pub exp: i64,
}

impl JwtClaims {
    fn into_user(self) -> Result<AuthenticatedUser, AuthError> {
        let user_id = UserId::new(&self.user_id).map_err(|_| {
            tracing::warn!("Invalid user ID in token: {:?}", self.user_id);
            AuthError::InvalidToken
        })?;

        if self.role.trim().is_empty() {
            tracing::warn!(user_id = %user_id, "Token missing role claim");
            return Err(AuthError::InvalidToken);
        }

        let mut user = AuthenticatedUser::new(user_id, self.email, self.role);
        user.department = self.department;
        user.language = self.language;
        user.level = self.level;
        Ok(user)
    }
}

/// Session validator for tokens signed with a shared HS256 secret.
pub struct JwtSessionValidator {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtSessionValidator {
    pub fn new(secret: &Secret<String>, leeway_secs: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = leeway_secs;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            decoding_key: DecodingKey::from_secret(secret.expose_secret().as_bytes()),
            validation,
        }
    }
}

#[async_trait]
impl SessionValidator for JwtSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let token_data = decode::<JwtClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                use jsonwebtoken::errors::ErrorKind;
                match e.kind() {
                    ErrorKind::ExpiredSignature => {
                        tracing::debug!("Token expired");
                        AuthError::TokenExpired
                    }
                    _ => {
                        tracing::warn!("Token validation failed: {}", e);
                        AuthError::InvalidToken
                    }
                }
            })?;

        token_data.claims.into_user()
    }
}

impl std::fmt::Debug for JwtSessionValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtSessionValidator")
            .field("leeway", &self.validation.leeway)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &str = "test-secret-with-enough-entropy";

    fn validator() -> JwtSessionValidator {
        JwtSessionValidator::new(&Secret::new(SECRET.to_string()), 0)
    }

    fn claims(exp_offset_secs: i64) -> JwtClaims {
        JwtClaims {
            user_id: "user_john".to_string(),
            email: "john@company.com".to_string(),
            role: "LEARNER".to_string(),
            department: Some("IT".to_string()),
            language: Some("english".to_string()),
            level: Some(2),
            exp: chrono::Utc::now().timestamp() + exp_offset_secs,
        }
    }

    fn sign(claims: &JwtClaims, secret: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn accepts_valid_token_and_maps_claims() {
        let token = sign(&claims(3600), SECRET);

        let user = validator().validate(&token).await.unwrap();

        assert_eq!(user.id.as_str(), "user_john");
        assert_eq!(user.email, "john@company.com");
        assert_eq!(user.role, "LEARNER");
        assert_eq!(user.department.as_deref(), Some("IT"));
        assert_eq!(user.language.as_deref(), Some("english"));
        assert_eq!(user.level, Some(2));
    }

    #[tokio::test]
    async fn optional_targeting_claims_may_be_absent() {
        let mut claims = claims(3600);
        claims.department = None;
        claims.language = None;
        claims.level = None;

        let user = validator().validate(&sign(&claims, SECRET)).await.unwrap();

        assert!(user.department.is_none());
        assert!(user.language.is_none());
        assert!(user.level.is_none());
    }

    #[tokio::test]
    async fn expired_token_is_reported_as_expired() {
        let token = sign(&claims(-3600), SECRET);

        let result = validator().validate(&token).await;

        assert_eq!(result.unwrap_err(), AuthError::TokenExpired);
    }

    #[tokio::test]
    async fn wrong_secret_is_rejected() {
        let token = sign(&claims(3600), "some-other-secret");

        let result = validator().validate(&token).await;

        assert_eq!(result.unwrap_err(), AuthError::InvalidToken);
    }

    #[tokio::test]
    async fn garbage_is_rejected() {
        let result = validator().validate("not-a-jwt").await;
        assert_eq!(result.unwrap_err(), AuthError::InvalidToken);
    }

    #[tokio::test]
    async fn blank_role_is_rejected() {
        let mut claims = claims(3600);
        claims.role = " ".to_string();

        let result = validator().validate(&sign(&claims, SECRET)).await;

        assert_eq!(result.unwrap_err(), AuthError::InvalidToken);
    }
}
