//! History Context - 历史记录限界上下文
//!
//! 职责:
//! - 已登录用户的摘要/翻译历史条目
//! - 分页参数规范化

mod entities;
mod pagination;

pub use entities::HistoryEntry;
pub use pagination::{Page, PageRequest, DEFAULT_PER_PAGE, MAX_PER_PAGE};
