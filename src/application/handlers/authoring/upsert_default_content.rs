//! UpsertDefaultContentHandler - replaces a content unit's default payload.

use std::sync::Arc;

use super::invalidate_steps;
use crate::domain::content::{ContentPayload, ContentUnit};
use crate::domain::foundation::{AuthenticatedUser, DomainError, UnitId};
use crate::ports::{ContentAuthoring, StepCache, VariantStore, VariantStoreError};

#[derive(Debug, Clone)]
pub struct UpsertDefaultContentCommand {
    pub author: AuthenticatedUser,
    pub unit_id: UnitId,
    pub content: ContentPayload,
}

/// The unit as it reads after the write.
pub type UpsertDefaultContentResult = ContentUnit;

#[derive(Debug, Clone, thiserror::Error)]
pub enum UpsertDefaultContentError {
    #[error("Only authors may edit content")]
    Forbidden,

    #[error("Content unit not found: {0}")]
    UnitNotFound(UnitId),

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

impl From<VariantStoreError> for UpsertDefaultContentError {
    fn from(err: VariantStoreError) -> Self {
        match err {
            VariantStoreError::UnitNotFound(id) => UpsertDefaultContentError::UnitNotFound(id),
            other => UpsertDefaultContentError::Infrastructure(other.to_string()),
        }
    }
}

impl From<DomainError> for UpsertDefaultContentError {
    fn from(err: DomainError) -> Self {
        UpsertDefaultContentError::Infrastructure(err.message)
    }
}

pub struct UpsertDefaultContentHandler {
    store: Arc<dyn VariantStore>,
    authoring: Arc<dyn ContentAuthoring>,
    cache: Option<Arc<dyn StepCache>>,
}

impl UpsertDefaultContentHandler {
    pub fn new(store: Arc<dyn VariantStore>, authoring: Arc<dyn ContentAuthoring>) -> Self {
        Self {
            store,
            authoring,
            cache: None,
        }
    }

    pub fn with_cache(mut self, cache: Arc<dyn StepCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub async fn handle(
        &self,
        cmd: UpsertDefaultContentCommand,
    ) -> Result<UpsertDefaultContentResult, UpsertDefaultContentError> {
        if !cmd.author.is_author() {
            return Err(UpsertDefaultContentError::Forbidden);
        }

        let mut unit = self.store.fetch_unit(&cmd.unit_id).await?;
        self.authoring.save_default(&cmd.unit_id, &cmd.content).await?;
        unit.default = Some(cmd.content);

        invalidate_steps(&self.cache).await;

        tracing::info!(
            unit_id = %cmd.unit_id,
            author = %cmd.author.id,
            "Default content updated"
        );

        Ok(unit)
    }
}
