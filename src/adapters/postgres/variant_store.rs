//! PostgreSQL implementation of VariantStore.

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use super::to_u32;
use crate::domain::content::{
    ComponentType, ContentPayload, ContentUnit, PartTag, ScreenOutline, Slot, StepOutline,
    StepType, Targeting, UnitRef, VariantRecord,
};
use crate::domain::foundation::{ScreenId, StepId, UnitId, VariantId};
use crate::ports::{VariantStore, VariantStoreError};

#[derive(Clone)]
pub struct PostgresVariantStore {
    pool: PgPool,
}

impl PostgresVariantStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn unavailable(context: &str, e: impl std::fmt::Display) -> VariantStoreError {
    VariantStoreError::unavailable(format!("{}: {}", context, e))
}

#[async_trait]
impl VariantStore for PostgresVariantStore {
    async fn fetch_unit(&self, unit_id: &UnitId) -> Result<ContentUnit, VariantStoreError> {
        let unit_row = sqlx::query("SELECT default_content FROM content_units WHERE id = $1")
            .bind(unit_id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| unavailable("Failed to fetch content unit", e))?
            .ok_or_else(|| VariantStoreError::UnitNotFound(unit_id.clone()))?;

        let default: Option<JsonValue> = unit_row
            .try_get("default_content")
            .map_err(|e| unavailable("Failed to read default content", e))?;
        let default = default.map(|v| payload(v, unit_id)).transpose()?;

        let variant_rows = sqlx::query(
            r#"
            SELECT id, target_role, target_level, target_language, target_department, content
            FROM content_variants
            WHERE unit_id = $1
            ORDER BY position ASC, id ASC
            "#,
        )
        .bind(unit_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| unavailable("Failed to fetch variants", e))?;

        let variants = variant_rows
            .iter()
            .map(|row| row_to_variant(row, unit_id))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ContentUnit {
            id: unit_id.clone(),
            default,
            variants,
        })
    }

    async fn fetch_step_outline(&self, step_id: &StepId) -> Result<StepOutline, VariantStoreError> {
        let step_row = sqlx::query("SELECT title, step_type FROM steps WHERE id = $1")
            .bind(step_id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| unavailable("Failed to fetch step", e))?
            .ok_or_else(|| VariantStoreError::StepNotFound(step_id.clone()))?;

        let header: String = step_row
            .try_get("title")
            .map_err(|e| unavailable("Failed to read step", e))?;
        let step_type: String = step_row
            .try_get("step_type")
            .map_err(|e| unavailable("Failed to read step", e))?;
        let step_type: StepType = step_type
            .parse()
            .map_err(|e| unavailable("Invalid step type", e))?;

        let screen_rows = sqlx::query(
            "SELECT id, position FROM screens WHERE step_id = $1 ORDER BY position ASC",
        )
        .bind(step_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| unavailable("Failed to fetch screens", e))?;

        let unit_rows = sqlx::query(
            r#"
            SELECT su.screen_id, su.unit_id, su.kind, su.component_type, su.slot, su.part
            FROM screen_units su
            JOIN screens s ON s.id = su.screen_id
            WHERE s.step_id = $1
            ORDER BY s.position ASC, su.position ASC
            "#,
        )
        .bind(step_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| unavailable("Failed to fetch screen units", e))?;

        let mut screens = Vec::with_capacity(screen_rows.len());
        for row in &screen_rows {
            let id: String = row
                .try_get("id")
                .map_err(|e| unavailable("Failed to read screen", e))?;
            let position: i32 = row
                .try_get("position")
                .map_err(|e| unavailable("Failed to read screen", e))?;
            screens.push(ScreenOutline {
                screen_id: ScreenId::new(id).map_err(|e| unavailable("Invalid screen id", e))?,
                position: to_u32(position, "screens.position")
                    .map_err(VariantStoreError::Unavailable)?,
                units: Vec::new(),
            });
        }

        for row in &unit_rows {
            let screen_id: String = row
                .try_get("screen_id")
                .map_err(|e| unavailable("Failed to read screen unit", e))?;
            let unit = row_to_unit_ref(row)?;
            if let Some(screen) = screens.iter_mut().find(|s| s.screen_id.as_str() == screen_id) {
                screen.units.push(unit);
            }
        }

        Ok(StepOutline {
            step_id: step_id.clone(),
            step_type,
            header,
            screens,
        })
    }
}

fn payload(value: JsonValue, unit_id: &UnitId) -> Result<ContentPayload, VariantStoreError> {
    ContentPayload::from_value(value)
        .map_err(|e| unavailable(&format!("Malformed content for unit {}", unit_id), e))
}

fn row_to_variant(row: &PgRow, unit_id: &UnitId) -> Result<VariantRecord, VariantStoreError> {
    let read = |e: sqlx::Error| unavailable("Failed to read variant", e);

    let id: String = row.try_get("id").map_err(read)?;
    let level: Option<i32> = row.try_get("target_level").map_err(read)?;
    let targeting = Targeting::from_columns(
        row.try_get("target_role").map_err(read)?,
        level.and_then(|l| u32::try_from(l).ok()),
        row.try_get("target_language").map_err(read)?,
        row.try_get("target_department").map_err(read)?,
    );
    let content: JsonValue = row.try_get("content").map_err(read)?;

    Ok(VariantRecord {
        id: VariantId::new(id).map_err(|e| unavailable("Invalid variant id", e))?,
        targeting,
        content: payload(content, unit_id)?,
    })
}

fn row_to_unit_ref(row: &PgRow) -> Result<UnitRef, VariantStoreError> {
    let read = |e: sqlx::Error| unavailable("Failed to read screen unit", e);

    let unit_id: String = row.try_get("unit_id").map_err(read)?;
    let unit_id = UnitId::new(unit_id).map_err(|e| unavailable("Invalid unit id", e))?;
    let kind: String = row.try_get("kind").map_err(read)?;

    match kind.as_str() {
        "component" => {
            let component_type: Option<String> = row.try_get("component_type").map_err(read)?;
            let slot: Option<String> = row.try_get("slot").map_err(read)?;
            let component_type = component_type
                .ok_or_else(|| VariantStoreError::unavailable("Component unit without type"))?;
            Ok(UnitRef::component(
                unit_id,
                ComponentType::from(component_type),
                slot.map(Slot::from).unwrap_or(Slot::MainContent),
            ))
        }
        "part" => {
            let part: Option<String> = row.try_get("part").map_err(read)?;
            let part: PartTag = part
                .ok_or_else(|| VariantStoreError::unavailable("Part unit without tag"))?
                .parse()
                .map_err(|e| unavailable("Invalid part tag", e))?;
            Ok(UnitRef::part(unit_id, part))
        }
        other => Err(VariantStoreError::unavailable(format!(
            "Unknown screen unit kind: {}",
            other
        ))),
    }
}
