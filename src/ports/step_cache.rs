//! Assembled step cache port.
//!
//! Memoizes resolved step payloads per `(step, profile fingerprint)`.
//! Callers treat every error as a cache miss.
//!
//! Every cache carries a generation that `invalidate_all` advances. A
//! writer reads the generation before assembling a payload and hands it
//! back to `put`, so a payload assembled before an invalidation is never
//! stored after it.

use async_trait::async_trait;
use std::fmt;

use crate::domain::content::StepPayload;
use crate::domain::foundation::StepId;
use crate::domain::learner::LearnerProfile;

/// Key of one memoized step payload.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
pub struct StepCacheKey {
    pub step_id: StepId,
    /// Hex SHA-256 of the profile's targeting values.
    pub fingerprint: String,
}

impl StepCacheKey {
    pub fn new(step_id: StepId, profile: &LearnerProfile) -> Self {
        Self {
            step_id,
            fingerprint: profile.fingerprint(),
        }
    }
}

impl fmt::Display for StepCacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "step:{}:{}", self.step_id, self.fingerprint)
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum StepCacheError {
    #[error("Cache backend error: {0}")]
    Backend(String),

    #[error("Cached payload could not be decoded: {0}")]
    Serialization(String),
}

#[async_trait]
pub trait StepCache: Send + Sync {
    /// Returns the cached payload, or `None` on a miss or expiry.
    async fn get(&self, key: &StepCacheKey) -> Result<Option<StepPayload>, StepCacheError>;

    /// Current generation. Read it before assembling the payload to `put`.
    async fn generation(&self) -> Result<u64, StepCacheError>;

    /// Stores a payload under `key` if `generation` is still current.
    /// A payload from an older generation is silently dropped.
    async fn put(
        &self,
        key: &StepCacheKey,
        generation: u64,
        payload: &StepPayload,
    ) -> Result<(), StepCacheError>;

    /// Drops every cached payload and advances the generation. Called
    /// after any content write.
    async fn invalidate_all(&self) -> Result<(), StepCacheError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::learner::{KnowledgeLevel, Role};

    #[test]
    fn key_display_includes_step_and_fingerprint() {
        let profile = LearnerProfile::new(Role::new("IT").unwrap(), KnowledgeLevel::BEGINNER);
        let key = StepCacheKey::new(StepId::new("word_s1").unwrap(), &profile);

        let rendered = key.to_string();
        assert!(rendered.starts_with("step:word_s1:"));
        assert!(rendered.ends_with(&profile.fingerprint()));
    }
}
