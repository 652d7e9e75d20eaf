//! In-process fakes shared by application tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::domain::catalog::LearningModule;
use crate::domain::content::{
    ContentPayload, ContentUnit, StepOutline, StepPayload, Targeting, VariantUpsert,
};
use crate::domain::foundation::{DomainError, ErrorCode, ModuleId, StepId, UnitId, UserId};
use crate::domain::progress::UserProgress;
use crate::domain::user::{ProfileChanges, UserAccount};
use crate::ports::{
    CatalogReader, ContentAuthoring, ProgressRepository, StepCache, StepCacheError, StepCacheKey,
    UserDirectory, VariantStore, VariantStoreError,
};

fn outage() -> DomainError {
    DomainError::new(ErrorCode::StorageUnavailable, "Simulated outage")
}

// ─────────────────────────────────────────────────────────────────────────────
// Variant store
// ─────────────────────────────────────────────────────────────────────────────

pub struct MockVariantStore {
    units: HashMap<UnitId, ContentUnit>,
    outlines: HashMap<StepId, StepOutline>,
    fail: bool,
}

impl MockVariantStore {
    pub fn new() -> Self {
        Self {
            units: HashMap::new(),
            outlines: HashMap::new(),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    pub fn with_unit(mut self, unit: ContentUnit) -> Self {
        self.units.insert(unit.id.clone(), unit);
        self
    }

    pub fn with_outline(mut self, outline: StepOutline) -> Self {
        self.outlines.insert(outline.step_id.clone(), outline);
        self
    }
}

#[async_trait]
impl VariantStore for MockVariantStore {
    async fn fetch_unit(&self, unit_id: &UnitId) -> Result<ContentUnit, VariantStoreError> {
        if self.fail {
            return Err(VariantStoreError::unavailable("simulated outage"));
        }
        self.units
            .get(unit_id)
            .cloned()
            .ok_or_else(|| VariantStoreError::UnitNotFound(unit_id.clone()))
    }

    async fn fetch_step_outline(&self, step_id: &StepId) -> Result<StepOutline, VariantStoreError> {
        if self.fail {
            return Err(VariantStoreError::unavailable("simulated outage"));
        }
        self.outlines
            .get(step_id)
            .cloned()
            .ok_or_else(|| VariantStoreError::StepNotFound(step_id.clone()))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Catalog
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MockCatalogReader {
    modules: Vec<LearningModule>,
    fail: bool,
}

impl MockCatalogReader {
    pub fn with_modules(modules: Vec<LearningModule>) -> Self {
        Self {
            modules,
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            modules: Vec::new(),
            fail: true,
        }
    }
}

#[async_trait]
impl CatalogReader for MockCatalogReader {
    async fn list_modules(&self) -> Result<Vec<LearningModule>, DomainError> {
        if self.fail {
            return Err(outage());
        }
        Ok(self.modules.clone())
    }

    async fn get_module(&self, id: &ModuleId) -> Result<Option<LearningModule>, DomainError> {
        if self.fail {
            return Err(outage());
        }
        Ok(self.modules.iter().find(|m| &m.module_id == id).cloned())
    }

    async fn step_exists(&self, id: &StepId) -> Result<bool, DomainError> {
        if self.fail {
            return Err(outage());
        }
        Ok(self.modules.iter().any(|m| m.contains_step(id)))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Progress
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MockProgressRepository {
    records: Mutex<Vec<UserProgress>>,
    fail: bool,
}

impl MockProgressRepository {
    pub fn failing() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn saved(&self) -> Vec<UserProgress> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProgressRepository for MockProgressRepository {
    async fn find(
        &self,
        user_id: &UserId,
        step_id: &StepId,
    ) -> Result<Option<UserProgress>, DomainError> {
        if self.fail {
            return Err(outage());
        }
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|p| &p.user_id == user_id && &p.step_id == step_id)
            .cloned())
    }

    async fn save(&self, progress: &UserProgress) -> Result<(), DomainError> {
        if self.fail {
            return Err(outage());
        }
        let mut records = self.records.lock().unwrap();
        records.retain(|p| !(p.user_id == progress.user_id && p.step_id == progress.step_id));
        records.push(progress.clone());
        Ok(())
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<UserProgress>, DomainError> {
        if self.fail {
            return Err(outage());
        }
        let mut records: Vec<_> = self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|p| &p.user_id == user_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| a.step_id.cmp(&b.step_id));
        Ok(records)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// User directory
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MockUserDirectory {
    accounts: Mutex<Vec<UserAccount>>,
    fail: bool,
}

impl MockUserDirectory {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn with_account(self, account: UserAccount) -> Self {
        self.accounts.lock().unwrap().push(account);
        self
    }
}

#[async_trait]
impl UserDirectory for MockUserDirectory {
    async fn find(&self, user_id: &UserId) -> Result<Option<UserAccount>, DomainError> {
        if self.fail {
            return Err(outage());
        }
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| &a.id == user_id)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<UserAccount>, DomainError> {
        if self.fail {
            return Err(outage());
        }
        let mut accounts = self.accounts.lock().unwrap().clone();
        accounts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(accounts)
    }

    async fn update_profile(
        &self,
        user_id: &UserId,
        changes: &ProfileChanges,
    ) -> Result<UserAccount, DomainError> {
        if self.fail {
            return Err(outage());
        }
        let mut accounts = self.accounts.lock().unwrap();
        let account = accounts
            .iter_mut()
            .find(|a| &a.id == user_id)
            .ok_or_else(|| DomainError::new(ErrorCode::UserNotFound, "User not found"))?;
        changes.apply(account);
        Ok(account.clone())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Authoring
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MockContentAuthoring {
    pub defaults: Mutex<Vec<(UnitId, ContentPayload)>>,
    units: Mutex<HashMap<UnitId, ContentUnit>>,
    fail: bool,
}

impl MockContentAuthoring {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Seeds a unit that variant upserts can target.
    pub fn with_unit(self, unit: ContentUnit) -> Self {
        self.units.lock().unwrap().insert(unit.id.clone(), unit);
        self
    }

    pub fn unit(&self, id: &str) -> Option<ContentUnit> {
        self.units
            .lock()
            .unwrap()
            .values()
            .find(|u| u.id.as_str() == id)
            .cloned()
    }
}

#[async_trait]
impl ContentAuthoring for MockContentAuthoring {
    async fn save_default(
        &self,
        unit_id: &UnitId,
        content: &ContentPayload,
    ) -> Result<(), DomainError> {
        if self.fail {
            return Err(outage());
        }
        self.defaults
            .lock()
            .unwrap()
            .push((unit_id.clone(), content.clone()));
        Ok(())
    }

    async fn upsert_variant(
        &self,
        unit_id: &UnitId,
        targeting: &Targeting,
        content: &ContentPayload,
    ) -> Result<VariantUpsert, DomainError> {
        if self.fail {
            return Err(outage());
        }
        let mut units = self.units.lock().unwrap();
        let unit = units.get_mut(unit_id).ok_or_else(|| {
            DomainError::new(ErrorCode::UnitNotFound, format!("Content unit not found: {}", unit_id))
        })?;
        Ok(unit.upsert_variant(targeting.clone(), content.clone()))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Step cache
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MockStepCache {
    entries: Mutex<HashMap<String, StepPayload>>,
    generation: AtomicU64,
    puts: AtomicUsize,
    invalidations: AtomicUsize,
    fail: bool,
}

impl MockStepCache {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn put_count(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }

    pub fn invalidation_count(&self) -> usize {
        self.invalidations.load(Ordering::SeqCst)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().unwrap().is_empty()
    }
}

#[async_trait]
impl StepCache for MockStepCache {
    async fn get(&self, key: &StepCacheKey) -> Result<Option<StepPayload>, StepCacheError> {
        if self.fail {
            return Err(StepCacheError::Backend("down".into()));
        }
        Ok(self.entries.lock().unwrap().get(&key.to_string()).cloned())
    }

    async fn generation(&self) -> Result<u64, StepCacheError> {
        if self.fail {
            return Err(StepCacheError::Backend("down".into()));
        }
        Ok(self.generation.load(Ordering::SeqCst))
    }

    async fn put(
        &self,
        key: &StepCacheKey,
        generation: u64,
        payload: &StepPayload,
    ) -> Result<(), StepCacheError> {
        self.puts.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(StepCacheError::Backend("down".into()));
        }
        let mut entries = self.entries.lock().unwrap();
        if generation == self.generation.load(Ordering::SeqCst) {
            entries.insert(key.to_string(), payload.clone());
        }
        Ok(())
    }

    async fn invalidate_all(&self) -> Result<(), StepCacheError> {
        self.invalidations.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(StepCacheError::Backend("down".into()));
        }
        let mut entries = self.entries.lock().unwrap();
        self.generation.fetch_add(1, Ordering::SeqCst);
        entries.clear();
        Ok(())
    }
}
