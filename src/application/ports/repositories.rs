//! Repository Ports - 出站端口
//!
//! 定义数据持久化的抽象接口
//! 具体实现在 infrastructure 层（如 SQLite）

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::history::{HistoryEntry, PageRequest};

/// Repository 错误
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Duplicate entity: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

// ============================================================================
// History Repository
// ============================================================================

/// History Repository Port
#[async_trait]
pub trait HistoryRepositoryPort: Send + Sync {
    /// 保存历史条目
    async fn save(&self, entry: &HistoryEntry) -> Result<(), RepositoryError>;

    /// 分页获取用户历史（按创建时间倒序）
    async fn find_by_user(
        &self,
        user_id: i64,
        page: PageRequest,
    ) -> Result<Vec<HistoryEntry>, RepositoryError>;

    /// 用户历史总数
    async fn count_by_user(&self, user_id: i64) -> Result<u64, RepositoryError>;
}

// ============================================================================
// System Config Repository
// ============================================================================

/// 系统配置实体（value 为密文）
#[derive(Debug, Clone)]
pub struct SystemConfigRecord {
    pub key: String,
    pub value: String,
    pub description: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// System Config Repository Port
#[async_trait]
pub trait SystemConfigRepositoryPort: Send + Sync {
    /// 根据 key 查找配置
    async fn find_by_key(&self, key: &str) -> Result<Option<SystemConfigRecord>, RepositoryError>;

    /// 插入或更新配置
    async fn upsert(&self, record: &SystemConfigRecord) -> Result<(), RepositoryError>;
}
