//! In-memory content store.
//!
//! Holds the catalog, step outlines and content units behind a single
//! `RwLock`. Implements the read ports and the authoring port, so writes
//! are visible to the next resolution. Useful for development and tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::adapters::seed::ContentSeed;
use crate::domain::catalog::LearningModule;
use crate::domain::content::{ContentPayload, ContentUnit, StepOutline, Targeting, VariantUpsert};
use crate::domain::foundation::{DomainError, ErrorCode, ModuleId, StepId, UnitId};
use crate::ports::{CatalogReader, ContentAuthoring, VariantStore, VariantStoreError};

#[derive(Debug, Default)]
struct ContentState {
    modules: Vec<LearningModule>,
    outlines: HashMap<StepId, StepOutline>,
    units: HashMap<UnitId, ContentUnit>,
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryContentStore {
    state: Arc<RwLock<ContentState>>,
}

impl InMemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store populated from a validated seed.
    pub fn from_seed(seed: &ContentSeed) -> Self {
        let mut modules: Vec<LearningModule> = seed.modules.iter().map(|m| m.to_module()).collect();
        modules.sort_by_key(|m| m.position);

        let outlines = seed
            .steps()
            .map(|step| (step.step_id.clone(), step.outline()))
            .collect();
        let units = seed
            .units
            .iter()
            .map(|unit| (unit.id.clone(), unit.clone()))
            .collect();

        Self {
            state: Arc::new(RwLock::new(ContentState {
                modules,
                outlines,
                units,
            })),
        }
    }

    pub async fn unit_count(&self) -> usize {
        self.state.read().await.units.len()
    }
}

fn unit_not_found(unit_id: &UnitId) -> DomainError {
    DomainError::new(
        ErrorCode::UnitNotFound,
        format!("Content unit not found: {}", unit_id),
    )
}

#[async_trait]
impl VariantStore for InMemoryContentStore {
    async fn fetch_unit(&self, unit_id: &UnitId) -> Result<ContentUnit, VariantStoreError> {
        self.state
            .read()
            .await
            .units
            .get(unit_id)
            .cloned()
            .ok_or_else(|| VariantStoreError::UnitNotFound(unit_id.clone()))
    }

    async fn fetch_step_outline(&self, step_id: &StepId) -> Result<StepOutline, VariantStoreError> {
        self.state
            .read()
            .await
            .outlines
            .get(step_id)
            .cloned()
            .ok_or_else(|| VariantStoreError::StepNotFound(step_id.clone()))
    }
}

#[async_trait]
impl CatalogReader for InMemoryContentStore {
    async fn list_modules(&self) -> Result<Vec<LearningModule>, DomainError> {
        Ok(self.state.read().await.modules.clone())
    }

    async fn get_module(&self, id: &ModuleId) -> Result<Option<LearningModule>, DomainError> {
        Ok(self
            .state
            .read()
            .await
            .modules
            .iter()
            .find(|m| &m.module_id == id)
            .cloned())
    }

    async fn step_exists(&self, id: &StepId) -> Result<bool, DomainError> {
        Ok(self.state.read().await.outlines.contains_key(id))
    }
}

#[async_trait]
impl ContentAuthoring for InMemoryContentStore {
    async fn save_default(
        &self,
        unit_id: &UnitId,
        content: &ContentPayload,
    ) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        let unit = state
            .units
            .get_mut(unit_id)
            .ok_or_else(|| unit_not_found(unit_id))?;
        unit.default = Some(content.clone());
        Ok(())
    }

    async fn upsert_variant(
        &self,
        unit_id: &UnitId,
        targeting: &Targeting,
        content: &ContentPayload,
    ) -> Result<VariantUpsert, DomainError> {
        let mut state = self.state.write().await;
        let unit = state
            .units
            .get_mut(unit_id)
            .ok_or_else(|| unit_not_found(unit_id))?;

        Ok(unit.upsert_variant(targeting.clone(), content.clone()))
    }
}
