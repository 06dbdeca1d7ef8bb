//! Tool HTTP Handlers - 摘要/翻译

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::{SummarizeText, TranslateText};
use crate::infrastructure::http::dto::{
    ApiResponse, SummarizeRequest, SummarizeResponseDto, TranslateRequest, TranslateResponseDto,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::extractors::MaybeUser;
use crate::infrastructure::http::state::AppState;

/// 摘要
pub async fn summarize(
    State(state): State<Arc<AppState>>,
    MaybeUser(user): MaybeUser,
    Json(req): Json<SummarizeRequest>,
) -> Result<Json<ApiResponse<SummarizeResponseDto>>, ApiError> {
    let command = SummarizeText {
        text: req.text,
        user,
    };

    let result = state.summarize_handler.handle(command).await?;

    Ok(Json(ApiResponse::success(result.into())))
}

/// 翻译
pub async fn translate(
    State(state): State<Arc<AppState>>,
    MaybeUser(user): MaybeUser,
    Json(req): Json<TranslateRequest>,
) -> Result<Json<ApiResponse<TranslateResponseDto>>, ApiError> {
    let command = TranslateText {
        text: req.text,
        target_lang: req.target_lang,
        user,
    };

    let result = state.translate_handler.handle(command).await?;

    Ok(Json(ApiResponse::success(result.into())))
}
