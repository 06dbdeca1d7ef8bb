//! HTTP Routes
//!
//! API Endpoints:
//! - /api/ping                 GET   健康检查
//! - /api/tools/summarize      POST  摘要（可选认证）
//! - /api/tools/translate      POST  翻译（可选认证）
//! - /api/history              GET   当前用户历史（需认证）
//! - /api/admin/config/:key    PUT   更新系统配置（需认证）

use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new().nest("/api", api_routes())
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .nest("/tools", tool_routes())
        .route("/history", get(handlers::list_history))
        .nest("/admin", admin_routes())
}

/// Tool 路由
fn tool_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/summarize", post(handlers::summarize))
        .route("/translate", post(handlers::translate))
}

/// Admin 路由
fn admin_routes() -> Router<Arc<AppState>> {
    Router::new().route("/config/:key", put(handlers::update_config))
}
