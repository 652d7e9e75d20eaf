//! PostgreSQL implementation of ContentAuthoring.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use super::db_error;
use crate::domain::content::{
    AxisValue, ContentPayload, TargetAxis, Targeting, VariantRecord, VariantUpsert,
};
use crate::domain::foundation::{DomainError, ErrorCode, UnitId, VariantId};
use crate::ports::ContentAuthoring;

#[derive(Clone)]
pub struct PostgresContentAuthoring {
    pool: PgPool,
}

impl PostgresContentAuthoring {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn unit_not_found(unit_id: &UnitId) -> DomainError {
    DomainError::new(
        ErrorCode::UnitNotFound,
        format!("Content unit not found: {}", unit_id),
    )
}

fn text(targeting: &Targeting, axis: TargetAxis) -> Option<String> {
    targeting.value_for(axis).map(|v| v.to_string())
}

/// Value for the `target_level` column. A level that does not fit the
/// column is rejected; storing NULL would turn it into a wildcard.
fn level_column(targeting: &Targeting) -> Result<Option<i32>, DomainError> {
    match targeting.value_for(TargetAxis::Level) {
        Some(AxisValue::Level(level)) => i32::try_from(*level).map(Some).map_err(|_| {
            DomainError::validation(
                "targetLevel",
                format!("Target level {} exceeds {}", level, i32::MAX),
            )
        }),
        _ => Ok(None),
    }
}

#[async_trait]
impl ContentAuthoring for PostgresContentAuthoring {
    async fn save_default(
        &self,
        unit_id: &UnitId,
        content: &ContentPayload,
    ) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE content_units SET default_content = $2 WHERE id = $1")
            .bind(unit_id.as_str())
            .bind(content.clone().into_value())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error(&format!("Failed to update default content: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(unit_not_found(unit_id));
        }
        Ok(())
    }

    async fn upsert_variant(
        &self,
        unit_id: &UnitId,
        targeting: &Targeting,
        content: &ContentPayload,
    ) -> Result<VariantUpsert, DomainError> {
        let level = level_column(targeting)?;
        let role = text(targeting, TargetAxis::Role);
        let language = text(targeting, TargetAxis::Language);
        let department = text(targeting, TargetAxis::Department);

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error(&format!("Failed to begin transaction: {}", e)))?;

        // Row lock on the unit serializes upserts of its variants.
        let locked = sqlx::query("SELECT id FROM content_units WHERE id = $1 FOR UPDATE")
            .bind(unit_id.as_str())
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| db_error(&format!("Failed to lock unit: {}", e)))?;
        if locked.is_none() {
            return Err(unit_not_found(unit_id));
        }

        // Blank text and non-positive levels read back as wildcards.
        let existing = sqlx::query(
            r#"
            SELECT id FROM content_variants
            WHERE unit_id = $1
              AND NULLIF(target_role, '') IS NOT DISTINCT FROM $2
              AND (CASE WHEN target_level > 0 THEN target_level END) IS NOT DISTINCT FROM $3
              AND NULLIF(target_language, '') IS NOT DISTINCT FROM $4
              AND NULLIF(target_department, '') IS NOT DISTINCT FROM $5
            ORDER BY position ASC, id ASC
            LIMIT 1
            "#,
        )
        .bind(unit_id.as_str())
        .bind(&role)
        .bind(level)
        .bind(&language)
        .bind(&department)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| db_error(&format!("Failed to look up variant: {}", e)))?;

        let outcome = match existing {
            Some(row) => {
                let id: String = row
                    .try_get("id")
                    .map_err(|e| db_error(&format!("Failed to read variant id: {}", e)))?;

                sqlx::query("UPDATE content_variants SET content = $2 WHERE id = $1")
                    .bind(&id)
                    .bind(content.clone().into_value())
                    .execute(&mut *tx)
                    .await
                    .map_err(|e| db_error(&format!("Failed to update variant: {}", e)))?;

                VariantUpsert::Replaced(VariantRecord::new(
                    VariantId::new(id)?,
                    targeting.clone(),
                    content.clone(),
                ))
            }
            None => {
                let id = VariantId::generate();

                sqlx::query(
                    r#"
                    INSERT INTO content_variants (
                        id, unit_id, position, target_role, target_level,
                        target_language, target_department, content
                    ) VALUES (
                        $1, $2,
                        (SELECT COALESCE(MAX(position), 0) + 1 FROM content_variants WHERE unit_id = $2),
                        $3, $4, $5, $6, $7
                    )
                    "#,
                )
                .bind(id.as_str())
                .bind(unit_id.as_str())
                .bind(&role)
                .bind(level)
                .bind(&language)
                .bind(&department)
                .bind(content.clone().into_value())
                .execute(&mut *tx)
                .await
                .map_err(|e| db_error(&format!("Failed to insert variant: {}", e)))?;

                VariantUpsert::Appended(VariantRecord::new(id, targeting.clone(), content.clone()))
            }
        };

        tx.commit()
            .await
            .map_err(|e| db_error(&format!("Failed to commit variant: {}", e)))?;

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_column_passes_storable_levels() {
        assert_eq!(level_column(&Targeting::any()).unwrap(), None);
        assert_eq!(level_column(&Targeting::any().with_level(2)).unwrap(), Some(2));
        assert_eq!(
            level_column(&Targeting::any().with_level(i32::MAX as u32)).unwrap(),
            Some(i32::MAX)
        );
    }

    #[test]
    fn level_column_rejects_levels_beyond_int_range() {
        let err = level_column(&Targeting::any().with_level(3_000_000_000)).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }
}
