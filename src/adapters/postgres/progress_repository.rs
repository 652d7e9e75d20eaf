//! PostgreSQL implementation of ProgressRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use super::{db_error, to_u32};
use crate::domain::foundation::{DomainError, Percentage, StepId, Timestamp, UserId};
use crate::domain::progress::{ProgressStatus, UserProgress};
use crate::ports::ProgressRepository;

#[derive(Clone)]
pub struct PostgresProgressRepository {
    pool: PgPool,
}

impl PostgresProgressRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProgressRepository for PostgresProgressRepository {
    async fn find(
        &self,
        user_id: &UserId,
        step_id: &StepId,
    ) -> Result<Option<UserProgress>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT user_id, step_id, status, progress_percent, last_screen, updated_at
            FROM user_progress
            WHERE user_id = $1 AND step_id = $2
            "#,
        )
        .bind(user_id.as_str())
        .bind(step_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error(&format!("Failed to fetch progress: {}", e)))?;

        row.as_ref().map(row_to_progress).transpose()
    }

    async fn save(&self, progress: &UserProgress) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO user_progress (
                user_id, step_id, status, progress_percent, last_screen, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (user_id, step_id) DO UPDATE SET
                status = EXCLUDED.status,
                progress_percent = EXCLUDED.progress_percent,
                last_screen = EXCLUDED.last_screen,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(progress.user_id.as_str())
        .bind(progress.step_id.as_str())
        .bind(progress.status.as_str())
        .bind(i16::from(progress.progress_percent.value()))
        .bind(i32::try_from(progress.last_screen).unwrap_or(i32::MAX))
        .bind(*progress.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error(&format!("Failed to save progress: {}", e)))?;

        Ok(())
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<UserProgress>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT user_id, step_id, status, progress_percent, last_screen, updated_at
            FROM user_progress
            WHERE user_id = $1
            ORDER BY step_id ASC
            "#,
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error(&format!("Failed to list progress: {}", e)))?;

        rows.iter().map(row_to_progress).collect()
    }
}

fn row_to_progress(row: &PgRow) -> Result<UserProgress, DomainError> {
    let read = |e: sqlx::Error| db_error(&format!("Failed to read progress: {}", e));

    let user_id: String = row.try_get("user_id").map_err(read)?;
    let step_id: String = row.try_get("step_id").map_err(read)?;
    let status: String = row.try_get("status").map_err(read)?;
    let percent: i16 = row.try_get("progress_percent").map_err(read)?;
    let last_screen: i32 = row.try_get("last_screen").map_err(read)?;
    let updated_at: DateTime<Utc> = row.try_get("updated_at").map_err(read)?;

    Ok(UserProgress {
        user_id: UserId::new(user_id)?,
        step_id: StepId::new(step_id)?,
        status: status.parse::<ProgressStatus>()?,
        progress_percent: Percentage::try_new(percent)?,
        last_screen: to_u32(last_screen, "user_progress.last_screen").map_err(|e| db_error(&e))?,
        updated_at: Timestamp::from_datetime(updated_at),
    })
}
