//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables using the
//! `config` and `dotenvy` crates. Variables use the `SKILLPATH` prefix and
//! `__` between nested keys.
//!
//! # Example
//!
//! ```no_run
//! use skillpath::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod auth;
mod content;
mod database;
mod error;
mod features;
mod redis;
mod server;

pub use auth::AuthConfig;
pub use content::{ContentConfig, StoreBackend};
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use features::{CacheBackend, FeatureFlags};
pub use redis::RedisConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub redis: RedisConfig,

    pub auth: AuthConfig,

    #[serde(default)]
    pub content: ContentConfig,

    #[serde(default)]
    pub features: FeatureFlags,
}

impl AppConfig {
    /// Load configuration from the environment.
    ///
    /// Reads `.env` first if present, then every `SKILLPATH__*` variable:
    ///
    /// - `SKILLPATH__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `SKILLPATH__AUTH__JWT_SECRET=...` -> `auth.jwt_secret = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("SKILLPATH")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Semantic validation across sections.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.redis.validate()?;
        self.auth.validate(&self.server.environment)?;
        self.content.validate(&self.database)?;
        self.features.validate(&self.redis)?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Env vars are process-global.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "SKILLPATH__AUTH__JWT_SECRET",
        "SKILLPATH__SERVER__PORT",
        "SKILLPATH__SERVER__ENVIRONMENT",
        "SKILLPATH__CONTENT__STORE",
        "SKILLPATH__DATABASE__URL",
        "SKILLPATH__FEATURES__ENABLE_STEP_CACHE",
    ];

    fn set_minimal_env() {
        env::set_var("SKILLPATH__AUTH__JWT_SECRET", "test-secret");
    }

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3001);
        assert_eq!(config.content.store, StoreBackend::Memory);
        assert!(!config.features.enable_step_cache);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_jwt_secret_fails_to_load() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        assert!(AppConfig::load().is_err());
    }

    #[test]
    fn test_nested_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("SKILLPATH__SERVER__PORT", "8080");
        env::set_var("SKILLPATH__CONTENT__STORE", "postgres");
        env::set_var("SKILLPATH__DATABASE__URL", "postgresql://localhost/skillpath");
        env::set_var("SKILLPATH__FEATURES__ENABLE_STEP_CACHE", "true");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.content.store, StoreBackend::Postgres);
        assert!(config.features.enable_step_cache);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_postgres_without_url_fails_validation() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("SKILLPATH__CONTENT__STORE", "postgres");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("DATABASE__URL"))
        );
    }

    #[test]
    fn test_is_production() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("SKILLPATH__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.is_production());
        assert_eq!(config.validate(), Err(ValidationError::WeakJwtSecret));
    }
}
