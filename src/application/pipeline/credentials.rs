//! API Key 解析

use std::sync::Arc;

use crate::application::ports::{SecretCipherPort, SystemConfigRepositoryPort};

/// 系统配置表中存放生成式 API Key 的 key
pub const PROVIDER_API_KEY_NAME: &str = "GEMINI_API_KEY";

/// Credential Resolver
///
/// 每次逻辑调用前解析一次 API Key：
/// 1. 加密的系统配置（解密后非空才使用）
/// 2. 进程级配置的兜底 Key
pub struct CredentialResolver {
    config_repo: Arc<dyn SystemConfigRepositoryPort>,
    cipher: Arc<dyn SecretCipherPort>,
    fallback_key: Option<String>,
}

impl CredentialResolver {
    pub fn new(
        config_repo: Arc<dyn SystemConfigRepositoryPort>,
        cipher: Arc<dyn SecretCipherPort>,
        fallback_key: Option<String>,
    ) -> Self {
        Self {
            config_repo,
            cipher,
            fallback_key,
        }
    }

    /// 解析可用的 API Key，两处都没有时返回 None
    pub async fn resolve(&self) -> Option<String> {
        match self.config_repo.find_by_key(PROVIDER_API_KEY_NAME).await {
            Ok(Some(record)) => match self.cipher.decrypt(&record.value) {
                Ok(key) if !key.trim().is_empty() => return Some(key.trim().to_string()),
                Ok(_) => {
                    tracing::warn!(key = PROVIDER_API_KEY_NAME, "Stored API key is empty, using fallback");
                }
                Err(e) => {
                    tracing::warn!(key = PROVIDER_API_KEY_NAME, error = %e, "Failed to decrypt stored API key, using fallback");
                }
            },
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(key = PROVIDER_API_KEY_NAME, error = %e, "Failed to read API key from config store, using fallback");
            }
        }

        self.fallback_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use crate::application::ports::SystemConfigRecord;
    use crate::infrastructure::adapters::AesGcmCipher;
    use crate::infrastructure::memory::InMemorySystemConfigRepository;

    fn cipher() -> Arc<AesGcmCipher> {
        Arc::new(AesGcmCipher::from_key_bytes(&[7u8; 32]).unwrap())
    }

    async fn store_with(cipher: &AesGcmCipher, value: &str) -> Arc<InMemorySystemConfigRepository> {
        let repo = Arc::new(InMemorySystemConfigRepository::new());
        repo.upsert(&SystemConfigRecord {
            key: PROVIDER_API_KEY_NAME.to_string(),
            value: cipher.encrypt(value).unwrap(),
            description: None,
            updated_at: Utc::now(),
        })
        .await
        .unwrap();
        repo
    }

    #[tokio::test]
    async fn test_stored_key_takes_precedence() {
        let cipher = cipher();
        let repo = store_with(&cipher, "stored-key").await;
        let resolver = CredentialResolver::new(repo, cipher, Some("env-key".to_string()));

        assert_eq!(resolver.resolve().await.as_deref(), Some("stored-key"));
    }

    #[tokio::test]
    async fn test_falls_back_to_process_key() {
        let repo = Arc::new(InMemorySystemConfigRepository::new());
        let resolver = CredentialResolver::new(repo, cipher(), Some("env-key".to_string()));

        assert_eq!(resolver.resolve().await.as_deref(), Some("env-key"));
    }

    #[tokio::test]
    async fn test_undecryptable_value_falls_back() {
        let repo = Arc::new(InMemorySystemConfigRepository::new());
        repo.upsert(&SystemConfigRecord {
            key: PROVIDER_API_KEY_NAME.to_string(),
            value: "not-a-ciphertext".to_string(),
            description: None,
            updated_at: Utc::now(),
        })
        .await
        .unwrap();
        let resolver = CredentialResolver::new(repo, cipher(), Some("env-key".to_string()));

        assert_eq!(resolver.resolve().await.as_deref(), Some("env-key"));
    }

    #[tokio::test]
    async fn test_no_key_anywhere() {
        let repo = Arc::new(InMemorySystemConfigRepository::new());
        let resolver = CredentialResolver::new(repo, cipher(), Some("   ".to_string()));

        assert_eq!(resolver.resolve().await, None);
    }
}
