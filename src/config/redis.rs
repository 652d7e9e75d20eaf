//! Redis configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Redis connection settings. Only needed with the Redis step cache.
#[derive(Debug, Clone, Deserialize)]
pub struct RedisConfig {
    pub url: Option<String>,

    /// Connection timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Prefix for every key this service writes
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
}

impl RedisConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(url) = &self.url {
            if !url.starts_with("redis://") && !url.starts_with("rediss://") {
                return Err(ValidationError::InvalidRedisUrl);
            }
        }
        Ok(())
    }
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: None,
            timeout_secs: default_timeout(),
            key_prefix: default_key_prefix(),
        }
    }
}

fn default_timeout() -> u64 {
    5
}

fn default_key_prefix() -> String {
    "skillpath".to_string()
}
