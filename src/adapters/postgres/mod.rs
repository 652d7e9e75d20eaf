//! PostgreSQL adapters - Database implementations of the content, catalog,
//! progress and user directory ports.
//!
//! Queries are built at runtime (no compile-time checked macros). The
//! schema is managed outside this service:
//!
//! ```sql
//! CREATE TABLE modules (
//!     id          TEXT PRIMARY KEY,
//!     title       TEXT NOT NULL,
//!     description TEXT,
//!     position    INT  NOT NULL
//! );
//! CREATE TABLE steps (
//!     id        TEXT PRIMARY KEY,
//!     module_id TEXT NOT NULL REFERENCES modules(id),
//!     title     TEXT NOT NULL,
//!     step_type TEXT NOT NULL,            -- VIDEO | SKILL | HANDSON
//!     position  INT  NOT NULL
//! );
//! CREATE TABLE screens (
//!     id       TEXT PRIMARY KEY,
//!     step_id  TEXT NOT NULL REFERENCES steps(id),
//!     position INT  NOT NULL
//! );
//! CREATE TABLE content_units (
//!     id              TEXT PRIMARY KEY,
//!     default_content JSONB
//! );
//! CREATE TABLE screen_units (
//!     screen_id      TEXT NOT NULL REFERENCES screens(id),
//!     unit_id        TEXT NOT NULL REFERENCES content_units(id),
//!     position       INT  NOT NULL,
//!     kind           TEXT NOT NULL,       -- component | part
//!     component_type TEXT,
//!     slot           TEXT,
//!     part           TEXT,                -- instructions | mission
//!     PRIMARY KEY (screen_id, unit_id)
//! );
//! CREATE TABLE content_variants (
//!     id                TEXT PRIMARY KEY,
//!     unit_id           TEXT NOT NULL REFERENCES content_units(id),
//!     position          INT  NOT NULL,
//!     target_role       TEXT,
//!     target_level      INT,
//!     target_language   TEXT,
//!     target_department TEXT,
//!     content           JSONB NOT NULL
//! );
//! CREATE TABLE user_progress (
//!     user_id          TEXT NOT NULL,
//!     step_id          TEXT NOT NULL REFERENCES steps(id),
//!     status           TEXT NOT NULL,
//!     progress_percent SMALLINT NOT NULL,
//!     last_screen      INT NOT NULL,
//!     updated_at       TIMESTAMPTZ NOT NULL,
//!     PRIMARY KEY (user_id, step_id)
//! );
//! CREATE TABLE users (
//!     id                 TEXT PRIMARY KEY,
//!     email              TEXT NOT NULL UNIQUE,
//!     name               TEXT,
//!     role               TEXT NOT NULL,
//!     department         TEXT,
//!     copilot_language   TEXT,
//!     ai_knowledge_level INT NOT NULL DEFAULT 1,
//!     created_at         TIMESTAMPTZ NOT NULL DEFAULT now()
//! );
//! ```

mod catalog_reader;
mod content_authoring;
mod progress_repository;
mod user_directory;
mod variant_store;

pub use catalog_reader::PostgresCatalogReader;
pub use content_authoring::PostgresContentAuthoring;
pub use progress_repository::PostgresProgressRepository;
pub use user_directory::PostgresUserDirectory;
pub use variant_store::PostgresVariantStore;

use crate::domain::foundation::{DomainError, ErrorCode};

fn db_error(msg: &str) -> DomainError {
    DomainError::new(ErrorCode::StorageUnavailable, msg.to_string())
}

/// Converts a stored non-negative integer, rejecting negatives.
fn to_u32(value: i32, column: &str) -> Result<u32, String> {
    u32::try_from(value).map_err(|_| format!("Negative value {} in column {}", value, column))
}
