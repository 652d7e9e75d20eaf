//! UpsertVariantHandler - creates or updates a targeted variant of a unit.

use std::sync::Arc;

use super::invalidate_steps;
use crate::domain::content::{ContentPayload, Targeting, VariantUpsert};
use crate::domain::foundation::{AuthenticatedUser, DomainError, ErrorCode, UnitId, ValidationError};
use crate::ports::{ContentAuthoring, StepCache};

/// Command to store a variant.
///
/// A variant with identical targeting is updated in place; otherwise the
/// new variant is appended and ranks last on specificity ties.
#[derive(Debug, Clone)]
pub struct UpsertVariantCommand {
    pub author: AuthenticatedUser,
    pub unit_id: UnitId,
    pub targeting: Targeting,
    pub content: ContentPayload,
}

pub type UpsertVariantResult = VariantUpsert;

#[derive(Debug, Clone, thiserror::Error)]
pub enum UpsertVariantError {
    #[error("Only authors may edit content")]
    Forbidden,

    #[error("Invalid targeting: {0}")]
    Validation(#[from] ValidationError),

    #[error("Content unit not found: {0}")]
    UnitNotFound(UnitId),

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

impl UpsertVariantError {
    fn from_domain(err: DomainError, unit_id: &UnitId) -> Self {
        match err.code {
            ErrorCode::UnitNotFound => UpsertVariantError::UnitNotFound(unit_id.clone()),
            ErrorCode::ValidationFailed => UpsertVariantError::Validation(
                ValidationError::invalid_format("targeting", err.message),
            ),
            _ => UpsertVariantError::Infrastructure(err.message),
        }
    }
}

pub struct UpsertVariantHandler {
    authoring: Arc<dyn ContentAuthoring>,
    cache: Option<Arc<dyn StepCache>>,
}

impl UpsertVariantHandler {
    pub fn new(authoring: Arc<dyn ContentAuthoring>) -> Self {
        Self {
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
        cmd: UpsertVariantCommand,
    ) -> Result<UpsertVariantResult, UpsertVariantError> {
        if !cmd.author.is_author() {
            return Err(UpsertVariantError::Forbidden);
        }
        cmd.targeting.validate()?;

        let outcome = self
            .authoring
            .upsert_variant(&cmd.unit_id, &cmd.targeting, &cmd.content)
            .await
            .map_err(|e| UpsertVariantError::from_domain(e, &cmd.unit_id))?;

        invalidate_steps(&self.cache).await;

        tracing::info!(
            unit_id = %cmd.unit_id,
            variant_id = %outcome.record().id,
            replaced = outcome.is_replaced(),
            author = %cmd.author.id,
            "Variant stored"
        );

        Ok(outcome)
    }
}
