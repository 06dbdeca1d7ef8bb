//! Tool Command Handlers - 摘要/翻译

use std::sync::Arc;

use crate::application::commands::{SummarizeText, TierLimits, TranslateText};
use crate::application::error::ApplicationError;
use crate::application::pipeline::DispatchPipeline;
use crate::application::ports::{AuthenticatedUser, HistoryRepositoryPort};
use crate::domain::dispatch::{DispatchOutcome, DispatchRequest, DEFAULT_TARGET_LANGUAGE};
use crate::domain::history::HistoryEntry;

/// 校验文本非空且未超出调用方所在档位的字符上限
fn check_text(
    text: &str,
    user: Option<&AuthenticatedUser>,
    limits: &TierLimits,
) -> Result<(), ApplicationError> {
    if text.trim().is_empty() {
        return Err(ApplicationError::validation("Text cannot be empty"));
    }

    let limit = limits.limit_for(user);
    if text.chars().count() > limit {
        return Err(ApplicationError::LimitExceeded {
            limit,
            authenticated: user.is_some(),
        });
    }

    Ok(())
}

fn into_text(outcome: DispatchOutcome) -> Result<String, ApplicationError> {
    outcome.into_result().map_err(|(chunk_index, error)| {
        tracing::warn!(
            chunk_index = chunk_index,
            kind = error.kind().as_str(),
            error = %error,
            "Dispatch failed"
        );
        ApplicationError::DispatchFailed { chunk_index, error }
    })
}

// ============================================================================
// Summarize
// ============================================================================

/// 摘要响应
#[derive(Debug, Clone)]
pub struct SummarizeResponse {
    pub summary: String,
}

/// SummarizeText Handler
pub struct SummarizeHandler {
    pipeline: Arc<DispatchPipeline>,
    history_repo: Arc<dyn HistoryRepositoryPort>,
    limits: TierLimits,
}

impl SummarizeHandler {
    pub fn new(
        pipeline: Arc<DispatchPipeline>,
        history_repo: Arc<dyn HistoryRepositoryPort>,
        limits: TierLimits,
    ) -> Self {
        Self {
            pipeline,
            history_repo,
            limits,
        }
    }

    pub async fn handle(&self, command: SummarizeText) -> Result<SummarizeResponse, ApplicationError> {
        check_text(&command.text, command.user.as_ref(), &self.limits)?;

        let request = DispatchRequest::summarize(command.text.clone());
        let summary = into_text(self.pipeline.dispatch(&request).await)?;

        // 仅已登录用户保存历史
        if let Some(user) = command.user {
            let entry = HistoryEntry::summary(user.id, command.text, summary.clone());
            self.history_repo.save(&entry).await?;

            tracing::info!(user_id = user.id, history_id = %entry.id, "Summary saved to history");
        }

        Ok(SummarizeResponse { summary })
    }
}

// ============================================================================
// Translate
// ============================================================================

/// 翻译响应
#[derive(Debug, Clone)]
pub struct TranslateResponse {
    pub translation: String,
    pub target_lang: String,
}

/// TranslateText Handler
pub struct TranslateHandler {
    pipeline: Arc<DispatchPipeline>,
    history_repo: Arc<dyn HistoryRepositoryPort>,
    limits: TierLimits,
}

impl TranslateHandler {
    pub fn new(
        pipeline: Arc<DispatchPipeline>,
        history_repo: Arc<dyn HistoryRepositoryPort>,
        limits: TierLimits,
    ) -> Self {
        Self {
            pipeline,
            history_repo,
            limits,
        }
    }

    pub async fn handle(&self, command: TranslateText) -> Result<TranslateResponse, ApplicationError> {
        check_text(&command.text, command.user.as_ref(), &self.limits)?;

        // 缺省或空白的目标语言按默认语言处理
        let target_lang = command
            .target_lang
            .map(|lang| lang.trim().to_string())
            .filter(|lang| !lang.is_empty())
            .unwrap_or_else(|| DEFAULT_TARGET_LANGUAGE.to_string());
        let request = DispatchRequest::translate(command.text.clone(), target_lang.clone());

        let translation = into_text(self.pipeline.dispatch(&request).await)?;

        if let Some(user) = command.user {
            let entry = HistoryEntry::translation(
                user.id,
                command.text,
                translation.clone(),
                target_lang.clone(),
            );
            self.history_repo.save(&entry).await?;

            tracing::info!(user_id = user.id, history_id = %entry.id, "Translation saved to history");
        }

        Ok(TranslateResponse {
            translation,
            target_lang,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::application::pipeline::{CredentialResolver, RateLimitedDispatcher, RetryPolicy};
    use crate::domain::dispatch::{DispatchError, Operation};
    use crate::domain::history::PageRequest;
    use crate::infrastructure::adapters::{AesGcmCipher, FakeGenerationTransport, FakeReply};
    use crate::infrastructure::memory::InMemorySystemConfigRepository;
    use crate::infrastructure::persistence::sqlite::{
        create_pool, run_migrations, DatabaseConfig, SqliteHistoryRepository,
    };

    struct Fixture {
        transport: Arc<FakeGenerationTransport>,
        history_repo: Arc<SqliteHistoryRepository>,
        summarize: SummarizeHandler,
        translate: TranslateHandler,
    }

    async fn fixture(replies: Vec<FakeReply>) -> Fixture {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();
        let history_repo = Arc::new(SqliteHistoryRepository::new(pool));

        let transport = Arc::new(FakeGenerationTransport::scripted(replies));
        let credentials = CredentialResolver::new(
            Arc::new(InMemorySystemConfigRepository::new()),
            Arc::new(AesGcmCipher::from_key_bytes(&[9u8; 32]).unwrap()),
            Some("key".to_string()),
        );
        let pipeline = Arc::new(DispatchPipeline::new(RateLimitedDispatcher::new(
            transport.clone(),
            credentials,
            RetryPolicy::immediate(3),
        )));

        Fixture {
            transport,
            history_repo: history_repo.clone(),
            summarize: SummarizeHandler::new(pipeline.clone(), history_repo.clone(), TierLimits::default()),
            translate: TranslateHandler::new(pipeline, history_repo, TierLimits::default()),
        }
    }

    #[tokio::test]
    async fn test_guest_limit_enforced_before_dispatch() {
        let f = fixture(vec![]).await;

        let result = f
            .summarize
            .handle(SummarizeText {
                text: "a".repeat(251),
                user: None,
            })
            .await;

        assert!(matches!(
            result,
            Err(ApplicationError::LimitExceeded { limit: 250, authenticated: false })
        ));
        assert_eq!(f.transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_user_gets_higher_limit() {
        let f = fixture(vec![FakeReply::Text("short".to_string())]).await;

        let result = f
            .summarize
            .handle(SummarizeText {
                text: "a".repeat(1500),
                user: Some(AuthenticatedUser { id: 1 }),
            })
            .await
            .unwrap();

        assert_eq!(result.summary, "short");
    }

    #[tokio::test]
    async fn test_empty_text_rejected() {
        let f = fixture(vec![]).await;

        let result = f
            .translate
            .handle(TranslateText {
                text: "   ".to_string(),
                target_lang: None,
                user: None,
            })
            .await;

        assert!(matches!(result, Err(ApplicationError::ValidationError(_))));
        assert_eq!(f.transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_guest_result_not_saved() {
        let f = fixture(vec![FakeReply::Text("Hallo".to_string())]).await;

        let result = f
            .translate
            .handle(TranslateText {
                text: "Hello".to_string(),
                target_lang: Some("German".to_string()),
                user: None,
            })
            .await
            .unwrap();

        assert_eq!(result.translation, "Hallo");
        assert_eq!(result.target_lang, "German");
    }

    #[tokio::test]
    async fn test_user_translation_saved_with_default_language() {
        let f = fixture(vec![FakeReply::Text("Bonjour".to_string())]).await;

        f.translate
            .handle(TranslateText {
                text: "Hello".to_string(),
                target_lang: None,
                user: Some(AuthenticatedUser { id: 42 }),
            })
            .await
            .unwrap();

        let entries = f
            .history_repo
            .find_by_user(42, PageRequest::default())
            .await
            .unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action_type, Operation::Translate);
        assert_eq!(entries[0].translated_text.as_deref(), Some("Bonjour"));
        assert_eq!(entries[0].target_lang.as_deref(), Some("French"));
    }

    #[tokio::test]
    async fn test_blank_target_language_uses_default() {
        let f = fixture(vec![FakeReply::Text("Bonjour".to_string())]).await;

        let result = f
            .translate
            .handle(TranslateText {
                text: "Hello".to_string(),
                target_lang: Some(String::new()),
                user: None,
            })
            .await
            .unwrap();

        assert_eq!(result.target_lang, "French");
        assert!(f.transport.prompts()[0].contains("to French."));
    }

    #[tokio::test]
    async fn test_long_target_language_accepted() {
        let f = fixture(vec![FakeReply::Text("Olá".to_string())]).await;
        let label = "Brazilian Portuguese as spoken in Rio de Janeiro, informal register";

        let result = f
            .translate
            .handle(TranslateText {
                text: "Hello".to_string(),
                target_lang: Some(label.to_string()),
                user: None,
            })
            .await
            .unwrap();

        assert_eq!(result.target_lang, label);
        assert_eq!(result.translation, "Olá");
    }

    #[tokio::test]
    async fn test_failed_dispatch_saves_nothing() {
        let f = fixture(vec![
            FakeReply::Status(429),
            FakeReply::Status(429),
            FakeReply::Status(429),
        ])
        .await;

        let result = f
            .summarize
            .handle(SummarizeText {
                text: "Some text".to_string(),
                user: Some(AuthenticatedUser { id: 5 }),
            })
            .await;

        match result {
            Err(ApplicationError::DispatchFailed { chunk_index, error }) => {
                assert_eq!(chunk_index, 0);
                assert_eq!(error, DispatchError::Throttling { attempts: 3 });
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert_eq!(f.history_repo.count_by_user(5).await.unwrap(), 0);
    }
}
