//! GetStepContentHandler - Query handler returning a step personalized for
//! the requesting learner.

use std::sync::Arc;

use crate::application::content::ContentAssembler;
use crate::domain::content::StepPayload;
use crate::domain::foundation::{StepId, UnitId};
use crate::domain::learner::LearnerProfile;
use crate::ports::{StepCache, StepCacheKey, VariantStoreError};

/// Query for one step's content.
#[derive(Debug, Clone)]
pub struct GetStepContentQuery {
    pub step_id: StepId,
    pub profile: LearnerProfile,
}

pub type GetStepContentResult = StepPayload;

#[derive(Debug, Clone, thiserror::Error)]
pub enum GetStepContentError {
    #[error("Step not found: {0}")]
    StepNotFound(StepId),

    #[error("Content unit not found: {0}")]
    UnitNotFound(UnitId),

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

impl From<VariantStoreError> for GetStepContentError {
    fn from(err: VariantStoreError) -> Self {
        match err {
            VariantStoreError::StepNotFound(id) => GetStepContentError::StepNotFound(id),
            VariantStoreError::UnitNotFound(id) => GetStepContentError::UnitNotFound(id),
            VariantStoreError::Unavailable(msg) => GetStepContentError::Infrastructure(msg),
        }
    }
}

/// Handler for personalized step content.
///
/// When a cache is configured, payloads are memoized per
/// `(step, profile fingerprint)`. Cache failures are logged and bypassed.
/// The cache generation is read before assembly so that a content write
/// landing mid-assembly keeps the stale payload out of the cache.
pub struct GetStepContentHandler {
    assembler: ContentAssembler,
    cache: Option<Arc<dyn StepCache>>,
}

impl GetStepContentHandler {
    pub fn new(assembler: ContentAssembler) -> Self {
        Self {
            assembler,
            cache: None,
        }
    }

    pub fn with_cache(mut self, cache: Arc<dyn StepCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub async fn handle(
        &self,
        query: GetStepContentQuery,
    ) -> Result<GetStepContentResult, GetStepContentError> {
        let Some(cache) = &self.cache else {
            return Ok(self.assembler.assemble_step(&query.step_id, &query.profile).await?);
        };

        let generation = match cache.generation().await {
            Ok(generation) => generation,
            Err(e) => {
                tracing::warn!(step_id = %query.step_id, error = %e, "Step cache unavailable");
                return Ok(self.assembler.assemble_step(&query.step_id, &query.profile).await?);
            }
        };

        let key = StepCacheKey::new(query.step_id.clone(), &query.profile);
        match cache.get(&key).await {
            Ok(Some(payload)) => {
                tracing::debug!(step_id = %query.step_id, "Step cache hit");
                return Ok(payload);
            }
            Ok(None) => {}
            Err(e) => tracing::warn!(step_id = %query.step_id, error = %e, "Step cache read failed"),
        }

        let payload = self.assembler.assemble_step(&query.step_id, &query.profile).await?;

        if let Err(e) = cache.put(&key, generation, &payload).await {
            tracing::warn!(step_id = %query.step_id, error = %e, "Step cache write failed");
        }

        Ok(payload)
    }
}
