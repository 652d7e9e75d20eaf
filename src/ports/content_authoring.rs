//! Content authoring port (write side of personalized content).
//!
//! Writes are not coordinated with in-flight resolutions; callers
//! invalidate the step cache after every successful write.

use async_trait::async_trait;

use crate::domain::content::{ContentPayload, Targeting, VariantUpsert};
use crate::domain::foundation::{DomainError, UnitId};

#[async_trait]
pub trait ContentAuthoring: Send + Sync {
    /// Replace the default content of a unit.
    ///
    /// # Errors
    ///
    /// - `UnitNotFound` if the unit does not exist
    async fn save_default(&self, unit_id: &UnitId, content: &ContentPayload)
        -> Result<(), DomainError>;

    /// Store content for an exact targeting of a unit.
    ///
    /// The lookup of a variant with identical targeting and the write that
    /// follows are one atomic step: a match keeps its id and fetch position
    /// and gets the new content, otherwise a new variant is appended after
    /// all existing variants of the unit.
    ///
    /// # Errors
    ///
    /// - `UnitNotFound` if the unit does not exist
    /// - `ValidationFailed` if the targeting cannot be stored
    async fn upsert_variant(
        &self,
        unit_id: &UnitId,
        targeting: &Targeting,
        content: &ContentPayload,
    ) -> Result<VariantUpsert, DomainError>;
}
