//! Authoring command handlers.
//!
//! Only authors may write content. Every successful write drops all
//! memoized step payloads.

mod upsert_default_content;
mod upsert_variant;

use std::sync::Arc;

use crate::ports::StepCache;

pub use upsert_default_content::{
    UpsertDefaultContentCommand, UpsertDefaultContentError, UpsertDefaultContentHandler,
    UpsertDefaultContentResult,
};
pub use upsert_variant::{
    UpsertVariantCommand, UpsertVariantError, UpsertVariantHandler, UpsertVariantResult,
};

async fn invalidate_steps(cache: &Option<Arc<dyn StepCache>>) {
    if let Some(cache) = cache {
        if let Err(e) = cache.invalidate_all().await {
            tracing::warn!(error = %e, "Step cache invalidation failed");
        }
    }
}
