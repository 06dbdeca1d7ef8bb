//! History Queries

use crate::domain::history::PageRequest;

/// 分页列出当前用户历史
#[derive(Debug, Clone)]
pub struct ListHistory {
    pub user_id: i64,
    pub page: PageRequest,
}
