//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Content
//!
//! - `VariantStore` - read units, variants and step outlines
//! - `ContentAuthoring` - write defaults and variants
//! - `StepCache` - memoized assembled steps
//!
//! ## Learning
//!
//! - `CatalogReader` - modules and their steps
//! - `ProgressRepository` - per-step learner progress
//!
//! ## Identity
//!
//! - `SessionValidator` - bearer token validation
//! - `UserDirectory` - registered users and their profiles

mod catalog_reader;
mod content_authoring;
mod progress_repository;
mod session_validator;
mod step_cache;
mod user_directory;
mod variant_store;

pub use catalog_reader::CatalogReader;
pub use content_authoring::ContentAuthoring;
pub use progress_repository::ProgressRepository;
pub use session_validator::SessionValidator;
pub use step_cache::{StepCache, StepCacheError, StepCacheKey};
pub use user_directory::UserDirectory;
pub use variant_store::{VariantStore, VariantStoreError};
