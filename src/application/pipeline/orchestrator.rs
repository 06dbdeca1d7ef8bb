//! Pipeline Orchestrator
//!
//! - Summarize: 整段文本一次调用（不分块）
//! - Translate: 分块后逐块顺序调用，首个失败即短路

use crate::domain::dispatch::{
    summarize_prompt, translate_prompt, DispatchOutcome, DispatchRequest, Operation,
    DEFAULT_TARGET_LANGUAGE,
};
use crate::domain::{split_into_chunks, DEFAULT_MAX_CHUNK_CHARS};

use super::dispatcher::RateLimitedDispatcher;

/// 文本调度流水线
///
/// 无跨调用状态：每次 `dispatch` 相互独立
pub struct DispatchPipeline {
    dispatcher: RateLimitedDispatcher,
    max_chunk_chars: usize,
}

impl DispatchPipeline {
    pub fn new(dispatcher: RateLimitedDispatcher) -> Self {
        Self {
            dispatcher,
            max_chunk_chars: DEFAULT_MAX_CHUNK_CHARS,
        }
    }

    pub fn with_max_chunk_chars(mut self, max_chunk_chars: usize) -> Self {
        self.max_chunk_chars = max_chunk_chars.max(1);
        self
    }

    /// 是否已配置生成服务的 API Key
    pub async fn is_ready(&self) -> bool {
        self.dispatcher.has_credentials().await
    }

    /// 执行一次调度
    pub async fn dispatch(&self, request: &DispatchRequest) -> DispatchOutcome {
        match request.operation() {
            Operation::Summarize => self.summarize(request.text()).await,
            Operation::Translate => {
                let target = request.target_language().unwrap_or(DEFAULT_TARGET_LANGUAGE);
                self.translate(request.text(), target).await
            }
        }
    }

    // TODO: long inputs are sent to the provider in one piece; chunk summaries too if the tier limits are ever raised
    async fn summarize(&self, text: &str) -> DispatchOutcome {
        tracing::info!(text_chars = text.chars().count(), "Dispatching summarize request");

        match self.dispatcher.call(&summarize_prompt(text)).await {
            Ok(summary) => DispatchOutcome::completed(summary, 1),
            Err(error) => DispatchOutcome::failed(0, error),
        }
    }

    async fn translate(&self, text: &str, target_language: &str) -> DispatchOutcome {
        let chunks = split_into_chunks(text, self.max_chunk_chars);
        let chunk_count = chunks.len();

        tracing::info!(
            text_chars = text.chars().count(),
            chunk_count = chunk_count,
            target_language = %target_language,
            "Dispatching translate request"
        );

        let mut translations = Vec::with_capacity(chunk_count);
        for chunk in &chunks {
            let prompt = translate_prompt(&chunk.content, target_language);
            match self.dispatcher.call(&prompt).await {
                Ok(translated) => {
                    tracing::debug!(chunk_index = chunk.index, chunk_count = chunk_count, "Chunk translated");
                    translations.push(translated);
                }
                Err(error) => {
                    tracing::warn!(
                        chunk_index = chunk.index,
                        chunk_count = chunk_count,
                        error = %error,
                        "Chunk translation failed, aborting remaining chunks"
                    );
                    return DispatchOutcome::failed(chunk.index, error);
                }
            }
        }

        DispatchOutcome::completed(translations.join(" "), chunk_count)
    }
}
