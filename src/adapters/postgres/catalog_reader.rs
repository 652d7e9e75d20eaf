//! PostgreSQL implementation of CatalogReader.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use super::{db_error, to_u32};
use crate::domain::catalog::{LearningModule, StepSummary};
use crate::domain::content::StepType;
use crate::domain::foundation::{DomainError, ModuleId, StepId};
use crate::ports::CatalogReader;

#[derive(Clone)]
pub struct PostgresCatalogReader {
    pool: PgPool,
}

impl PostgresCatalogReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn steps_for(&self, module_id: Option<&ModuleId>) -> Result<Vec<(ModuleId, StepSummary)>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, module_id, title, step_type, position
            FROM steps
            WHERE $1::TEXT IS NULL OR module_id = $1
            ORDER BY module_id ASC, position ASC
            "#,
        )
        .bind(module_id.map(|id| id.as_str()))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error(&format!("Failed to fetch steps: {}", e)))?;

        rows.iter().map(row_to_step).collect()
    }
}

#[async_trait]
impl CatalogReader for PostgresCatalogReader {
    async fn list_modules(&self) -> Result<Vec<LearningModule>, DomainError> {
        let rows = sqlx::query(
            "SELECT id, title, description, position FROM modules ORDER BY position ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error(&format!("Failed to fetch modules: {}", e)))?;

        let mut modules = rows
            .iter()
            .map(row_to_module)
            .collect::<Result<Vec<_>, _>>()?;

        for (module_id, step) in self.steps_for(None).await? {
            if let Some(module) = modules.iter_mut().find(|m| m.module_id == module_id) {
                module.steps.push(step);
            }
        }

        Ok(modules)
    }

    async fn get_module(&self, id: &ModuleId) -> Result<Option<LearningModule>, DomainError> {
        let row = sqlx::query("SELECT id, title, description, position FROM modules WHERE id = $1")
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error(&format!("Failed to fetch module: {}", e)))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut module = row_to_module(&row)?;
        module.steps = self
            .steps_for(Some(id))
            .await?
            .into_iter()
            .map(|(_, step)| step)
            .collect();

        Ok(Some(module))
    }

    async fn step_exists(&self, id: &StepId) -> Result<bool, DomainError> {
        let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM steps WHERE id = $1)")
            .bind(id.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error(&format!("Failed to check step: {}", e)))?;

        Ok(exists.0)
    }
}

fn row_to_module(row: &PgRow) -> Result<LearningModule, DomainError> {
    let read = |e: sqlx::Error| db_error(&format!("Failed to read module: {}", e));

    let id: String = row.try_get("id").map_err(read)?;
    let position: i32 = row.try_get("position").map_err(read)?;

    Ok(LearningModule {
        module_id: ModuleId::new(id)?,
        title: row.try_get("title").map_err(read)?,
        description: row.try_get("description").map_err(read)?,
        position: to_u32(position, "modules.position").map_err(|e| db_error(&e))?,
        steps: Vec::new(),
    })
}

fn row_to_step(row: &PgRow) -> Result<(ModuleId, StepSummary), DomainError> {
    let read = |e: sqlx::Error| db_error(&format!("Failed to read step: {}", e));

    let id: String = row.try_get("id").map_err(read)?;
    let module_id: String = row.try_get("module_id").map_err(read)?;
    let step_type: String = row.try_get("step_type").map_err(read)?;
    let position: i32 = row.try_get("position").map_err(read)?;

    Ok((
        ModuleId::new(module_id)?,
        StepSummary {
            step_id: StepId::new(id)?,
            title: row.try_get("title").map_err(read)?,
            step_type: step_type.parse::<StepType>()?,
            order: to_u32(position, "steps.position").map_err(|e| db_error(&e))?,
        },
    ))
}
