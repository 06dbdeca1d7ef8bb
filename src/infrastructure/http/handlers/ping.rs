//! 健康检查

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::infrastructure::http::dto::ApiResponse;
use crate::infrastructure::http::state::AppState;

#[derive(Debug, Serialize)]
pub struct PingData {
    pub status: &'static str,
    pub version: &'static str,
    /// 为 false 时摘要/翻译请求会返回 503
    pub gemini_ready: bool,
}

/// GET /api/ping
pub async fn ping(State(state): State<Arc<AppState>>) -> Json<ApiResponse<PingData>> {
    Json(ApiResponse::success(PingData {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        gemini_ready: state.pipeline.is_ready().await,
    }))
}
