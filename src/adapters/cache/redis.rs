//! Redis-backed step cache for multi-server deployments.
//!
//! Entries are stored with `SET .. EX` under a generation-prefixed key:
//! `{prefix}:gen:{generation}:{step key}`. `invalidate_all` bumps the
//! generation counter, so every earlier entry becomes unreachable and
//! ages out on its own TTL. `put` writes under the generation the caller
//! read before assembling, so a late write from before an invalidation
//! lands on an unreachable key.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use std::time::Duration;

use crate::domain::content::StepPayload;
use crate::ports::{StepCache, StepCacheError, StepCacheKey};

#[derive(Clone)]
pub struct RedisStepCache {
    conn: MultiplexedConnection,
    prefix: String,
    ttl: Duration,
}

impl RedisStepCache {
    pub fn new(conn: MultiplexedConnection, prefix: impl Into<String>, ttl: Duration) -> Self {
        Self {
            conn,
            prefix: prefix.into(),
            ttl,
        }
    }

    fn generation_key(&self) -> String {
        format!("{}:generation", self.prefix)
    }

    async fn read_generation(&self) -> Result<u64, StepCacheError> {
        let mut conn = self.conn.clone();
        let generation: Option<u64> = conn
            .get(self.generation_key())
            .await
            .map_err(|e: redis::RedisError| StepCacheError::Backend(e.to_string()))?;
        Ok(generation.unwrap_or(0))
    }
}

fn entry_key(prefix: &str, generation: u64, key: &StepCacheKey) -> String {
    format!("{}:gen:{}:{}", prefix, generation, key)
}

#[async_trait]
impl StepCache for RedisStepCache {
    async fn get(&self, key: &StepCacheKey) -> Result<Option<StepPayload>, StepCacheError> {
        let generation = self.read_generation().await?;
        let redis_key = entry_key(&self.prefix, generation, key);
        let mut conn = self.conn.clone();

        let raw: Option<String> = conn
            .get(&redis_key)
            .await
            .map_err(|e: redis::RedisError| StepCacheError::Backend(e.to_string()))?;

        raw.map(|json| {
            serde_json::from_str(&json).map_err(|e| StepCacheError::Serialization(e.to_string()))
        })
        .transpose()
    }

    async fn generation(&self) -> Result<u64, StepCacheError> {
        self.read_generation().await
    }

    async fn put(
        &self,
        key: &StepCacheKey,
        generation: u64,
        payload: &StepPayload,
    ) -> Result<(), StepCacheError> {
        let redis_key = entry_key(&self.prefix, generation, key);
        let json = serde_json::to_string(payload)
            .map_err(|e| StepCacheError::Serialization(e.to_string()))?;
        let mut conn = self.conn.clone();

        conn.set_ex::<_, _, ()>(&redis_key, json, self.ttl.as_secs().max(1))
            .await
            .map_err(|e: redis::RedisError| StepCacheError::Backend(e.to_string()))?;

        Ok(())
    }

    async fn invalidate_all(&self) -> Result<(), StepCacheError> {
        let mut conn = self.conn.clone();

        conn.incr::<_, _, ()>(self.generation_key(), 1_u64)
            .await
            .map_err(|e: redis::RedisError| StepCacheError::Backend(e.to_string()))?;

        Ok(())
    }
}

impl std::fmt::Debug for RedisStepCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisStepCache")
            .field("prefix", &self.prefix)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}
