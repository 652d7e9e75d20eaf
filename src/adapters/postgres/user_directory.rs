//! PostgreSQL implementation of UserDirectory.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use super::{db_error, to_u32};
use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::learner::KnowledgeLevel;
use crate::domain::user::{ProfileChanges, UserAccount};
use crate::ports::UserDirectory;

const COLUMNS: &str = "id, email, name, role, department, copilot_language, \
                       ai_knowledge_level, created_at";

#[derive(Clone)]
pub struct PostgresUserDirectory {
    pool: PgPool,
}

impl PostgresUserDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserDirectory for PostgresUserDirectory {
    async fn find(&self, user_id: &UserId) -> Result<Option<UserAccount>, DomainError> {
        let row = sqlx::query(&format!("SELECT {} FROM users WHERE id = $1", COLUMNS))
            .bind(user_id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error(&format!("Failed to fetch user: {}", e)))?;

        row.as_ref().map(row_to_account).transpose()
    }

    async fn list(&self) -> Result<Vec<UserAccount>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM users ORDER BY created_at DESC, id ASC",
            COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error(&format!("Failed to list users: {}", e)))?;

        rows.iter().map(row_to_account).collect()
    }

    async fn update_profile(
        &self,
        user_id: &UserId,
        changes: &ProfileChanges,
    ) -> Result<UserAccount, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error(&format!("Failed to begin transaction: {}", e)))?;

        let row = sqlx::query(&format!("SELECT {} FROM users WHERE id = $1 FOR UPDATE", COLUMNS))
            .bind(user_id.as_str())
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| db_error(&format!("Failed to lock user: {}", e)))?
            .ok_or_else(|| {
                DomainError::new(ErrorCode::UserNotFound, format!("User not found: {}", user_id))
            })?;

        let mut account = row_to_account(&row)?;
        changes.apply(&mut account);

        let level = i32::try_from(account.level.value())
            .map_err(|_| DomainError::validation("aiKnowledgeLevel", "Level out of range"))?;

        sqlx::query(
            r#"
            UPDATE users
            SET name = $2, department = $3, copilot_language = $4, ai_knowledge_level = $5
            WHERE id = $1
            "#,
        )
        .bind(user_id.as_str())
        .bind(&account.name)
        .bind(&account.department)
        .bind(&account.language)
        .bind(level)
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error(&format!("Failed to update user: {}", e)))?;

        tx.commit()
            .await
            .map_err(|e| db_error(&format!("Failed to commit user: {}", e)))?;

        Ok(account)
    }
}

fn row_to_account(row: &PgRow) -> Result<UserAccount, DomainError> {
    let read = |e: sqlx::Error| db_error(&format!("Failed to read user: {}", e));

    let id: String = row.try_get("id").map_err(read)?;
    let level: i32 = row.try_get("ai_knowledge_level").map_err(read)?;
    let created_at: DateTime<Utc> = row.try_get("created_at").map_err(read)?;

    Ok(UserAccount {
        id: UserId::new(id)?,
        email: row.try_get("email").map_err(read)?,
        name: row.try_get("name").map_err(read)?,
        role: row.try_get("role").map_err(read)?,
        department: row.try_get("department").map_err(read)?,
        language: row.try_get("copilot_language").map_err(read)?,
        level: KnowledgeLevel::new(
            to_u32(level, "users.ai_knowledge_level").map_err(|e| db_error(&e))?,
        )?,
        created_at: Timestamp::from_datetime(created_at),
    })
}
