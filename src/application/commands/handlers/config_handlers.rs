//! System Config Command Handlers

use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::application::commands::UpdateSystemConfig;
use crate::application::error::ApplicationError;
use crate::application::ports::{SecretCipherPort, SystemConfigRecord, SystemConfigRepositoryPort};

/// 配置 key 最大长度
const MAX_KEY_LEN: usize = 128;

/// 更新配置响应（不包含明文 value）
#[derive(Debug, Clone)]
pub struct SystemConfigResponse {
    pub key: String,
    pub description: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// UpdateSystemConfig Handler
pub struct UpdateSystemConfigHandler {
    config_repo: Arc<dyn SystemConfigRepositoryPort>,
    cipher: Arc<dyn SecretCipherPort>,
}

impl UpdateSystemConfigHandler {
    pub fn new(
        config_repo: Arc<dyn SystemConfigRepositoryPort>,
        cipher: Arc<dyn SecretCipherPort>,
    ) -> Self {
        Self { config_repo, cipher }
    }

    pub async fn handle(
        &self,
        command: UpdateSystemConfig,
    ) -> Result<SystemConfigResponse, ApplicationError> {
        let key = command.key.trim();
        if key.is_empty() {
            return Err(ApplicationError::validation("Config key cannot be empty"));
        }
        if key.len() > MAX_KEY_LEN {
            return Err(ApplicationError::validation(format!(
                "Config key cannot exceed {} characters",
                MAX_KEY_LEN
            )));
        }

        let encrypted = self.cipher.encrypt(&command.value)?;
        let existing = self.config_repo.find_by_key(key).await?;
        let created = existing.is_none();

        // 未提供新描述时保留原描述
        let description = command
            .description
            .filter(|d| !d.is_empty())
            .or_else(|| existing.and_then(|e| e.description));

        let record = SystemConfigRecord {
            key: key.to_string(),
            value: encrypted,
            description,
            updated_at: Utc::now(),
        };
        self.config_repo.upsert(&record).await?;

        tracing::info!(key = %record.key, created = created, "System config updated");

        Ok(SystemConfigResponse {
            key: record.key,
            description: record.description,
            updated_at: record.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::infrastructure::adapters::AesGcmCipher;
    use crate::infrastructure::memory::InMemorySystemConfigRepository;

    fn handler() -> (UpdateSystemConfigHandler, Arc<InMemorySystemConfigRepository>, Arc<AesGcmCipher>) {
        let repo = Arc::new(InMemorySystemConfigRepository::new());
        let cipher = Arc::new(AesGcmCipher::from_key_bytes(&[5u8; 32]).unwrap());
        (
            UpdateSystemConfigHandler::new(repo.clone(), cipher.clone()),
            repo,
            cipher,
        )
    }

    #[tokio::test]
    async fn test_value_is_stored_encrypted() {
        let (handler, repo, cipher) = handler();

        handler
            .handle(UpdateSystemConfig {
                key: "GEMINI_API_KEY".to_string(),
                value: "secret".to_string(),
                description: Some("provider key".to_string()),
            })
            .await
            .unwrap();

        let stored = repo.find_by_key("GEMINI_API_KEY").await.unwrap().unwrap();
        assert_ne!(stored.value, "secret");
        assert_eq!(cipher.decrypt(&stored.value).unwrap(), "secret");
    }

    #[tokio::test]
    async fn test_description_kept_when_not_provided() {
        let (handler, repo, _) = handler();

        handler
            .handle(UpdateSystemConfig {
                key: "K".to_string(),
                value: "v1".to_string(),
                description: Some("first".to_string()),
            })
            .await
            .unwrap();
        let response = handler
            .handle(UpdateSystemConfig {
                key: "K".to_string(),
                value: "v2".to_string(),
                description: None,
            })
            .await
            .unwrap();

        assert_eq!(response.description.as_deref(), Some("first"));
        let stored = repo.find_by_key("K").await.unwrap().unwrap();
        assert_eq!(stored.description.as_deref(), Some("first"));
    }

    #[tokio::test]
    async fn test_empty_key_rejected() {
        let (handler, _, _) = handler();

        let result = handler
            .handle(UpdateSystemConfig {
                key: " ".to_string(),
                value: "v".to_string(),
                description: None,
            })
            .await;

        assert!(matches!(result, Err(ApplicationError::ValidationError(_))));
    }
}
