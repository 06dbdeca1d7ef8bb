//! History HTTP Handlers

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::application::ListHistory;
use crate::domain::history::{Page, PageRequest};
use crate::infrastructure::http::dto::{ApiResponse, HistoryItemDto, HistoryQuery};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::extractors::CurrentUser;
use crate::infrastructure::http::state::AppState;

/// 当前用户历史（按时间倒序分页）
pub async fn list_history(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Query(params): Query<HistoryQuery>,
) -> Result<Json<ApiResponse<Page<HistoryItemDto>>>, ApiError> {
    let query = ListHistory {
        user_id: user.id,
        page: PageRequest::new(params.page, params.per_page),
    };

    let page = state.list_history_handler.handle(query).await?;

    Ok(Json(ApiResponse::success(page.map(HistoryItemDto::from))))
}
