//! Step cache adapters.
//!
//! - `InMemoryStepCache` - per-process TTL map for tests and single-server runs
//! - `RedisStepCache` - shared cache for multi-server deployments

mod in_memory;
mod redis;

pub use in_memory::InMemoryStepCache;
pub use redis::RedisStepCache;
