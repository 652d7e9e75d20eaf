//! VariantResolver - fetches one content unit and picks its payload for a
//! learner profile.

use std::sync::Arc;

use crate::domain::content::{ResolvedContent, TargetingSubject};
use crate::domain::foundation::UnitId;
use crate::ports::{VariantStore, VariantStoreError};

/// Resolves content units through the injected [`VariantStore`].
#[derive(Clone)]
pub struct VariantResolver {
    store: Arc<dyn VariantStore>,
}

impl VariantResolver {
    pub fn new(store: Arc<dyn VariantStore>) -> Self {
        Self { store }
    }

    /// Fetches `unit_id` and resolves it for `subject`.
    ///
    /// `Ok(None)` means the unit has neither a default nor a matching
    /// variant; "no match" on its own is never an error.
    pub async fn resolve(
        &self,
        unit_id: &UnitId,
        subject: &(impl TargetingSubject + Sync),
    ) -> Result<Option<ResolvedContent>, VariantStoreError> {
        let unit = self.store.fetch_unit(unit_id).await?;
        let resolved = unit.resolve(subject);

        if let Some(resolved) = &resolved {
            tracing::debug!(
                unit_id = %unit_id,
                variant_id = ?resolved.variant_id,
                specificity = resolved.specificity,
                "Resolved content unit"
            );
        }

        Ok(resolved)
    }
}
