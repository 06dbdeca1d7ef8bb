//! Rate-Limited Call Dispatcher
//!
//! 一次逻辑调用 = 解析 Key + 至多 `max_attempts` 次 HTTP 尝试。
//! 每次尝试前固定等待 `pacing_delay`，用来把整体调用频率压在服务商每分钟配额以下；
//! 429 按指数退避，其他传输失败等待固定时长。

use std::sync::Arc;

use super::credentials::CredentialResolver;
use super::retry::{AttemptOutcome, RetryPolicy, RetryableFailure};
use crate::application::ports::{GenerateContentRequest, GenerationTransportPort};
use crate::domain::dispatch::DispatchError;

/// 限速 + 重试的调用器
pub struct RateLimitedDispatcher {
    transport: Arc<dyn GenerationTransportPort>,
    credentials: CredentialResolver,
    policy: RetryPolicy,
}

impl RateLimitedDispatcher {
    pub fn new(
        transport: Arc<dyn GenerationTransportPort>,
        credentials: CredentialResolver,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            transport,
            credentials,
            policy,
        }
    }

    /// 当前能否解析到可用的 API Key（不发起网络请求）
    pub async fn has_credentials(&self) -> bool {
        self.credentials.resolve().await.is_some()
    }

    /// 发出一次逻辑调用，返回第一个候选的文本
    pub async fn call(&self, prompt: &str) -> Result<String, DispatchError> {
        // 没有 Key 时直接失败，不发起任何请求
        let api_key = self.credentials.resolve().await.ok_or_else(|| {
            DispatchError::configuration("GEMINI_API_KEY is not configured")
        })?;

        let request = GenerateContentRequest::from_prompt(prompt);
        let max_attempts = self.policy.max_attempts;
        let mut last_failure = RetryableFailure::Transport("no attempt was made".to_string());

        for attempt in 0..max_attempts {
            tokio::time::sleep(self.policy.pacing_delay).await;

            let result = self.transport.send(&api_key, &request).await;

            match self.policy.classify(attempt, result) {
                AttemptOutcome::Success(text) => {
                    tracing::debug!(
                        attempt = attempt + 1,
                        prompt_len = prompt.len(),
                        result_len = text.len(),
                        "Generation call succeeded"
                    );
                    return Ok(text);
                }
                AttemptOutcome::Fatal(err) => {
                    tracing::error!(attempt = attempt + 1, error = %err, "Generation call failed");
                    return Err(err);
                }
                AttemptOutcome::Retry { delay, failure } => {
                    let is_last = attempt + 1 >= max_attempts;
                    tracing::warn!(
                        attempt = attempt + 1,
                        max_attempts = max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        reason = %failure,
                        will_retry = !is_last,
                        "Generation call attempt failed"
                    );
                    last_failure = failure;
                    if !is_last {
                        tokio::time::sleep(delay).await;
                    }
                }
            }
        }

        let err = last_failure.into_error(max_attempts);
        tracing::error!(max_attempts = max_attempts, error = %err, "Generation call retries exhausted");
        Err(err)
    }
}
