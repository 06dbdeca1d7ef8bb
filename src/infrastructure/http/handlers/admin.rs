//! Admin HTTP Handlers

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::application::UpdateSystemConfig;
use crate::infrastructure::http::dto::{ApiResponse, SystemConfigDto, UpdateConfigRequest};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::extractors::CurrentUser;
use crate::infrastructure::http::state::AppState;

/// 更新系统配置，value 加密后落库
pub async fn update_config(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(key): Path<String>,
    Json(req): Json<UpdateConfigRequest>,
) -> Result<Json<ApiResponse<SystemConfigDto>>, ApiError> {
    tracing::info!(user_id = user.id, key = %key, "Updating system config");

    let command = UpdateSystemConfig {
        key,
        value: req.value,
        description: req.description,
    };

    let result = state.update_config_handler.handle(command).await?;

    Ok(Json(ApiResponse::success(result.into())))
}
