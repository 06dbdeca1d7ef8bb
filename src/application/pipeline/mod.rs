//! Text Dispatch Pipeline - 文本调度流水线
//!
//! - credentials: API Key 解析（加密配置优先，进程配置兜底）
//! - retry: 重试策略，退避时长作为数据返回
//! - dispatcher: 限速 + 重试的单次逻辑调用
//! - orchestrator: 摘要/翻译编排，翻译按块顺序调用并在首个失败处短路

mod credentials;
mod dispatcher;
mod orchestrator;
mod retry;

pub use credentials::{CredentialResolver, PROVIDER_API_KEY_NAME};
pub use dispatcher::RateLimitedDispatcher;
pub use orchestrator::DispatchPipeline;
pub use retry::{
    AttemptOutcome, RetryPolicy, RetryableFailure, DEFAULT_MAX_ATTEMPTS, DEFAULT_PACING_DELAY,
    THROTTLE_BACKOFF_UNIT, TRANSIENT_RETRY_DELAY,
};
