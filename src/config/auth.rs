//! Authentication configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

const MIN_PRODUCTION_SECRET_LEN: usize = 32;

/// Bearer token settings (HS256 shared secret).
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Secret used to verify token signatures
    pub jwt_secret: Secret<String>,

    /// Clock skew tolerated when checking `exp`, in seconds
    #[serde(default = "default_leeway")]
    pub leeway_secs: u64,
}

impl AuthConfig {
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: Secret::new(jwt_secret.into()),
            leeway_secs: default_leeway(),
        }
    }

    /// Rejects an empty secret, and a short one in production.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        let secret = self.jwt_secret.expose_secret();
        if secret.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__JWT_SECRET"));
        }
        if *environment == Environment::Production && secret.len() < MIN_PRODUCTION_SECRET_LEN {
            return Err(ValidationError::WeakJwtSecret);
        }
        Ok(())
    }
}

fn default_leeway() -> u64 {
    30
}
