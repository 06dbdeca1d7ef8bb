//! SQLite History Repository

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use super::DbPool;
use crate::application::ports::{HistoryRepositoryPort, RepositoryError};
use crate::domain::dispatch::Operation;
use crate::domain::history::{HistoryEntry, PageRequest};

/// SQLite History Repository
pub struct SqliteHistoryRepository {
    pool: DbPool,
}

impl SqliteHistoryRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct HistoryRow {
    id: String,
    user_id: i64,
    action_type: String,
    original_text: String,
    summary_text: Option<String>,
    translated_text: Option<String>,
    target_lang: Option<String>,
    created_at: String,
}

impl TryFrom<HistoryRow> for HistoryEntry {
    type Error = RepositoryError;

    fn try_from(row: HistoryRow) -> Result<Self, Self::Error> {
        Ok(HistoryEntry {
            id: Uuid::parse_str(&row.id)
                .map_err(|e| RepositoryError::SerializationError(e.to_string()))?,
            user_id: row.user_id,
            action_type: row
                .action_type
                .parse::<Operation>()
                .map_err(RepositoryError::SerializationError)?,
            original_text: row.original_text,
            summary_text: row.summary_text,
            translated_text: row.translated_text,
            target_lang: row.target_lang,
            created_at: DateTime::parse_from_rfc3339(&row.created_at)
                .map_err(|e| RepositoryError::SerializationError(e.to_string()))?
                .with_timezone(&Utc),
        })
    }
}

/// 固定宽度的时间戳，保证按字符串排序即按时间排序
fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[async_trait]
impl HistoryRepositoryPort for SqliteHistoryRepository {
    async fn save(&self, entry: &HistoryEntry) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO history (id, user_id, action_type, original_text, summary_text, translated_text, target_lang, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(entry.id.to_string())
        .bind(entry.user_id)
        .bind(entry.action_type.as_str())
        .bind(&entry.original_text)
        .bind(&entry.summary_text)
        .bind(&entry.translated_text)
        .bind(&entry.target_lang)
        .bind(format_timestamp(&entry.created_at))
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                RepositoryError::Duplicate(entry.id.to_string())
            }
            other => RepositoryError::DatabaseError(other.to_string()),
        })?;

        Ok(())
    }

    async fn find_by_user(
        &self,
        user_id: i64,
        page: PageRequest,
    ) -> Result<Vec<HistoryEntry>, RepositoryError> {
        let rows: Vec<HistoryRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, action_type, original_text, summary_text, translated_text, target_lang, created_at
            FROM history
            WHERE user_id = ?
            ORDER BY created_at DESC, rowid DESC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(user_id)
        .bind(to_i64(page.limit()))
        .bind(to_i64(page.offset()))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(HistoryEntry::try_from).collect()
    }

    async fn count_by_user(&self, user_id: i64) -> Result<u64, RepositoryError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM history WHERE user_id = ?")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(u64::try_from(count).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::sqlite::{create_pool, run_migrations, DatabaseConfig};
    use chrono::Duration;

    async fn repo() -> SqliteHistoryRepository {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();
        SqliteHistoryRepository::new(pool)
    }

    #[tokio::test]
    async fn test_save_and_load_translation() {
        let repo = repo().await;
        let entry = HistoryEntry::translation(3, "Hello", "Hola", "Spanish");

        repo.save(&entry).await.unwrap();
        let loaded = repo.find_by_user(3, PageRequest::default()).await.unwrap();

        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, entry.id);
        assert_eq!(loaded[0].action_type, Operation::Translate);
        assert_eq!(loaded[0].translated_text.as_deref(), Some("Hola"));
        assert_eq!(loaded[0].summary_text.as_deref(), Some(""));
        assert_eq!(loaded[0].target_lang.as_deref(), Some("Spanish"));
    }

    #[tokio::test]
    async fn test_newest_first_and_paged() {
        let repo = repo().await;
        let base = Utc::now();
        for i in 0..3 {
            let mut entry = HistoryEntry::summary(1, format!("text {}", i), "s");
            entry.created_at = base + Duration::seconds(i);
            repo.save(&entry).await.unwrap();
        }

        let first = repo
            .find_by_user(1, PageRequest::new(Some(1), Some(2)))
            .await
            .unwrap();
        let second = repo
            .find_by_user(1, PageRequest::new(Some(2), Some(2)))
            .await
            .unwrap();

        assert_eq!(first.len(), 2);
        assert_eq!(first[0].original_text, "text 2");
        assert_eq!(first[1].original_text, "text 1");
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].original_text, "text 0");
    }

    #[tokio::test]
    async fn test_count_is_per_user() {
        let repo = repo().await;
        repo.save(&HistoryEntry::summary(1, "a", "s")).await.unwrap();
        repo.save(&HistoryEntry::summary(1, "b", "s")).await.unwrap();
        repo.save(&HistoryEntry::summary(2, "c", "s")).await.unwrap();

        assert_eq!(repo.count_by_user(1).await.unwrap(), 2);
        assert_eq!(repo.count_by_user(2).await.unwrap(), 1);
        assert_eq!(repo.count_by_user(3).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_duplicate_id_rejected() {
        let repo = repo().await;
        let entry = HistoryEntry::summary(1, "a", "s");

        repo.save(&entry).await.unwrap();

        assert!(matches!(
            repo.save(&entry).await,
            Err(RepositoryError::Duplicate(_))
        ));
    }
}
