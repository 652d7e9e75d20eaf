//! Adapters - Implementations of ports for specific technologies.
//!
//! - `memory` - In-memory stores (development and tests)
//! - `postgres` - PostgreSQL stores
//! - `seed` - YAML content seed loader
//! - `cache` - Assembled step caches (in-memory, Redis)
//! - `auth` - Session validators (JWT, mock)
//! - `http` - axum REST API

pub mod auth;
pub mod cache;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod seed;
