//! In-Memory System Config Store
//!
//! 无数据库时的系统配置存储，进程退出即丢失

use async_trait::async_trait;
use dashmap::DashMap;

use crate::application::ports::{RepositoryError, SystemConfigRecord, SystemConfigRepositoryPort};

/// 内存系统配置存储
pub struct InMemorySystemConfigRepository {
    records: DashMap<String, SystemConfigRecord>,
}

impl InMemorySystemConfigRepository {
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for InMemorySystemConfigRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SystemConfigRepositoryPort for InMemorySystemConfigRepository {
    async fn find_by_key(&self, key: &str) -> Result<Option<SystemConfigRecord>, RepositoryError> {
        Ok(self.records.get(key).map(|r| r.clone()))
    }

    async fn upsert(&self, record: &SystemConfigRecord) -> Result<(), RepositoryError> {
        self.records.insert(record.key.clone(), record.clone());
        tracing::debug!(key = %record.key, "System config stored in memory");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn record(key: &str, value: &str) -> SystemConfigRecord {
        SystemConfigRecord {
            key: key.to_string(),
            value: value.to_string(),
            description: None,
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_upsert_replaces_existing() {
        let repo = InMemorySystemConfigRepository::new();

        repo.upsert(&record("K", "a")).await.unwrap();
        repo.upsert(&record("K", "b")).await.unwrap();

        assert_eq!(repo.len(), 1);
        assert_eq!(repo.find_by_key("K").await.unwrap().unwrap().value, "b");
    }

    #[tokio::test]
    async fn test_missing_key() {
        let repo = InMemorySystemConfigRepository::new();
        assert!(repo.find_by_key("missing").await.unwrap().is_none());
    }
}
