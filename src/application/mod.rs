//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（生成服务传输、仓储、加解密、令牌校验）
//! - pipeline: 分块 + 限速 + 重试的文本调度流水线
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod pipeline;
pub mod ports;
pub mod queries;

// Re-exports
pub use commands::{
    handlers::{
        SummarizeHandler, SummarizeResponse, SystemConfigResponse, TranslateHandler,
        TranslateResponse, UpdateSystemConfigHandler,
    },
    SummarizeText, TierLimits, TranslateText, UpdateSystemConfig,
};

pub use error::ApplicationError;

pub use pipeline::{CredentialResolver, DispatchPipeline, RateLimitedDispatcher, RetryPolicy};

pub use ports::{
    AuthError, AuthenticatedUser, CipherError, GenerationTransportPort, HistoryRepositoryPort,
    RepositoryError, SecretCipherPort, SystemConfigRecord, SystemConfigRepositoryPort,
    TokenVerifierPort, TransportError, TransportResponse,
};

pub use queries::{handlers::ListHistoryHandler, ListHistory};
