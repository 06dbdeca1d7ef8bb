//! Domain Layer - 领域层
//!
//! 包含两个限界上下文:
//! - Dispatch Context: 摘要/翻译请求、调度结果
//! - History Context: 用户历史记录

pub mod dispatch;
pub mod history;

// 翻译前的文本分块器
mod text_splitter;

pub use text_splitter::{split_into_chunks, Chunk, DEFAULT_MAX_CHUNK_CHARS};
