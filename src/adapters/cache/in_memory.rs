//! In-memory step cache with a fixed time-to-live.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::domain::content::StepPayload;
use crate::ports::{StepCache, StepCacheError, StepCacheKey};

#[derive(Debug, Clone)]
struct CachedStep {
    payload: StepPayload,
    expires_at: Instant,
}

#[derive(Debug, Default)]
struct CacheState {
    generation: u64,
    entries: HashMap<StepCacheKey, CachedStep>,
}

/// Process-local step cache. Expired entries are treated as misses and
/// dropped lazily on the next write.
#[derive(Debug, Clone)]
pub struct InMemoryStepCache {
    state: Arc<RwLock<CacheState>>,
    ttl: Duration,
}

impl InMemoryStepCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            state: Arc::new(RwLock::new(CacheState::default())),
            ttl,
        }
    }

    /// Number of stored entries, including expired ones not yet evicted.
    pub async fn len(&self) -> usize {
        self.state.read().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.read().await.entries.is_empty()
    }
}

#[async_trait]
impl StepCache for InMemoryStepCache {
    async fn get(&self, key: &StepCacheKey) -> Result<Option<StepPayload>, StepCacheError> {
        let state = self.state.read().await;
        Ok(state
            .entries
            .get(key)
            .filter(|entry| entry.expires_at > Instant::now())
            .map(|entry| entry.payload.clone()))
    }

    async fn generation(&self) -> Result<u64, StepCacheError> {
        Ok(self.state.read().await.generation)
    }

    async fn put(
        &self,
        key: &StepCacheKey,
        generation: u64,
        payload: &StepPayload,
    ) -> Result<(), StepCacheError> {
        let now = Instant::now();
        let mut state = self.state.write().await;
        if state.generation != generation {
            tracing::debug!(key = %key, "Dropping step payload from an invalidated generation");
            return Ok(());
        }

        state.entries.retain(|_, entry| entry.expires_at > now);
        state.entries.insert(
            key.clone(),
            CachedStep {
                payload: payload.clone(),
                expires_at: now + self.ttl,
            },
        );
        Ok(())
    }

    async fn invalidate_all(&self) -> Result<(), StepCacheError> {
        let mut state = self.state.write().await;
        state.generation += 1;
        state.entries.clear();
        Ok(())
    }
}
