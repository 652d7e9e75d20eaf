//! Feature flags configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::redis::RedisConfig;

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    #[default]
    Memory,
    Redis,
}

/// Feature flags for enabling/disabling functionality
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureFlags {
    /// Memoize assembled steps per profile fingerprint
    #[serde(default)]
    pub enable_step_cache: bool,

    #[serde(default)]
    pub step_cache_backend: CacheBackend,

    #[serde(default = "default_step_cache_ttl")]
    pub step_cache_ttl_secs: u64,
}

impl FeatureFlags {
    pub fn step_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.step_cache_ttl_secs)
    }

    pub fn validate(&self, redis: &RedisConfig) -> Result<(), ValidationError> {
        if !self.enable_step_cache {
            return Ok(());
        }
        if self.step_cache_ttl_secs == 0 {
            return Err(ValidationError::InvalidCacheTtl);
        }
        if self.step_cache_backend == CacheBackend::Redis && redis.url.is_none() {
            return Err(ValidationError::MissingRequired("REDIS__URL"));
        }
        Ok(())
    }
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            enable_step_cache: false,
            step_cache_backend: CacheBackend::default(),
            step_cache_ttl_secs: default_step_cache_ttl(),
        }
    }
}

fn default_step_cache_ttl() -> u64 {
    300
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_flags_defaults() {
        let flags = FeatureFlags::default();
        assert!(!flags.enable_step_cache);
        assert_eq!(flags.step_cache_backend, CacheBackend::Memory);
        assert_eq!(flags.step_cache_ttl(), Duration::from_secs(300));
    }

    #[test]
    fn test_feature_flags_deserialization() {
        let json = r#"{
            "enable_step_cache": true,
            "step_cache_backend": "redis",
            "step_cache_ttl_secs": 60
        }"#;

        let flags: FeatureFlags = serde_json::from_str(json).unwrap();
        assert!(flags.enable_step_cache);
        assert_eq!(flags.step_cache_backend, CacheBackend::Redis);
        assert_eq!(flags.step_cache_ttl_secs, 60);
    }

    #[test]
    fn test_redis_cache_requires_redis_url() {
        let flags = FeatureFlags {
            enable_step_cache: true,
            step_cache_backend: CacheBackend::Redis,
            ..Default::default()
        };
        assert!(flags.validate(&RedisConfig::default()).is_err());
    }

    #[test]
    fn test_disabled_cache_skips_checks() {
        let flags = FeatureFlags {
            step_cache_ttl_secs: 0,
            ..Default::default()
        };
        assert!(flags.validate(&RedisConfig::default()).is_ok());
    }
}
