//! SQLite System Config Repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

use super::DbPool;
use crate::application::ports::{RepositoryError, SystemConfigRecord, SystemConfigRepositoryPort};

/// SQLite System Config Repository
pub struct SqliteSystemConfigRepository {
    pool: DbPool,
}

impl SqliteSystemConfigRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct SystemConfigRow {
    key: String,
    value: String,
    description: Option<String>,
    updated_at: String,
}

impl TryFrom<SystemConfigRow> for SystemConfigRecord {
    type Error = RepositoryError;

    fn try_from(row: SystemConfigRow) -> Result<Self, Self::Error> {
        Ok(SystemConfigRecord {
            key: row.key,
            value: row.value,
            description: row.description,
            updated_at: DateTime::parse_from_rfc3339(&row.updated_at)
                .map_err(|e| RepositoryError::SerializationError(e.to_string()))?
                .with_timezone(&Utc),
        })
    }
}

#[async_trait]
impl SystemConfigRepositoryPort for SqliteSystemConfigRepository {
    async fn find_by_key(&self, key: &str) -> Result<Option<SystemConfigRecord>, RepositoryError> {
        let row: Option<SystemConfigRow> = sqlx::query_as(
            "SELECT key, value, description, updated_at FROM system_config WHERE key = ?",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        row.map(SystemConfigRecord::try_from).transpose()
    }

    async fn upsert(&self, record: &SystemConfigRecord) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO system_config (key, value, description, updated_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                description = excluded.description,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(&record.key)
        .bind(&record.value)
        .bind(&record.description)
        .bind(record.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
