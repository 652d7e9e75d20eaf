//! Variant store port (read side of personalized content).
//!
//! Returns content units with their ordered variants, and step outlines.
//! Implementations must fail with a not-found error for unknown ids and
//! never return empty placeholder structures.

use async_trait::async_trait;

use crate::domain::content::{ContentUnit, StepOutline};
use crate::domain::foundation::{DomainError, ErrorCode, StepId, UnitId};

/// Errors raised while reading content.
#[derive(Debug, Clone, thiserror::Error)]
pub enum VariantStoreError {
    #[error("Step not found: {0}")]
    StepNotFound(StepId),

    #[error("Content unit not found: {0}")]
    UnitNotFound(UnitId),

    #[error("Content storage unavailable: {0}")]
    Unavailable(String),
}

impl VariantStoreError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        VariantStoreError::Unavailable(message.into())
    }
}

impl From<VariantStoreError> for DomainError {
    fn from(err: VariantStoreError) -> Self {
        let code = match &err {
            VariantStoreError::StepNotFound(_) => ErrorCode::StepNotFound,
            VariantStoreError::UnitNotFound(_) => ErrorCode::UnitNotFound,
            VariantStoreError::Unavailable(_) => ErrorCode::StorageUnavailable,
        };
        DomainError::new(code, err.to_string())
    }
}

/// Read-only access to content units and step outlines.
///
/// Reads are idempotent and may be issued concurrently for different
/// units of the same step.
#[async_trait]
pub trait VariantStore: Send + Sync {
    /// Fetch a unit with its default and its variants in stored order.
    ///
    /// # Errors
    ///
    /// - `UnitNotFound` if the unit does not exist
    /// - `Unavailable` if storage cannot be reached
    async fn fetch_unit(&self, unit_id: &UnitId) -> Result<ContentUnit, VariantStoreError>;

    /// Fetch the outline (type, header, screens and unit references) of a step.
    ///
    /// # Errors
    ///
    /// - `StepNotFound` if the step does not exist
    /// - `Unavailable` if storage cannot be reached
    async fn fetch_step_outline(&self, step_id: &StepId) -> Result<StepOutline, VariantStoreError>;
}
