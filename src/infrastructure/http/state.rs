//! Application State
//!
//! 包含所有 Command/Query Handlers 的应用状态

use std::sync::Arc;

use crate::application::{
    // Pipeline
    DispatchPipeline,
    // Command handlers
    SummarizeHandler, TierLimits, TranslateHandler, UpdateSystemConfigHandler,
    // Query handlers
    ListHistoryHandler,
    // Ports
    HistoryRepositoryPort, SecretCipherPort, SystemConfigRepositoryPort, TokenVerifierPort,
};

/// 应用状态
///
/// 调度流水线在启动时显式构造并在所有请求间共享
pub struct AppState {
    pub pipeline: Arc<DispatchPipeline>,

    // ========== Ports ==========
    pub token_verifier: Arc<dyn TokenVerifierPort>,

    // ========== Command Handlers ==========
    pub summarize_handler: SummarizeHandler,
    pub translate_handler: TranslateHandler,
    pub update_config_handler: UpdateSystemConfigHandler,

    // ========== Query Handlers ==========
    pub list_history_handler: ListHistoryHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        pipeline: Arc<DispatchPipeline>,
        history_repo: Arc<dyn HistoryRepositoryPort>,
        config_repo: Arc<dyn SystemConfigRepositoryPort>,
        cipher: Arc<dyn SecretCipherPort>,
        token_verifier: Arc<dyn TokenVerifierPort>,
        limits: TierLimits,
    ) -> Self {
        Self {
            pipeline: pipeline.clone(),

            // Ports
            token_verifier,

            // Command handlers
            summarize_handler: SummarizeHandler::new(pipeline.clone(), history_repo.clone(), limits),
            translate_handler: TranslateHandler::new(pipeline.clone(), history_repo.clone(), limits),
            update_config_handler: UpdateSystemConfigHandler::new(config_repo, cipher),

            // Query handlers
            list_history_handler: ListHistoryHandler::new(history_repo),
        }
    }
}
