//! Catalog reader port (module and step listings).

use async_trait::async_trait;

use crate::domain::catalog::LearningModule;
use crate::domain::foundation::{DomainError, ModuleId, StepId};

/// Reader port for the module catalog.
#[async_trait]
pub trait CatalogReader: Send + Sync {
    /// List all modules ordered by position, each with its steps ordered.
    async fn list_modules(&self) -> Result<Vec<LearningModule>, DomainError>;

    /// Get one module by id.
    ///
    /// Returns `None` if not found.
    async fn get_module(&self, id: &ModuleId) -> Result<Option<LearningModule>, DomainError>;

    /// Check whether a step exists.
    async fn step_exists(&self, id: &StepId) -> Result<bool, DomainError>;
}
