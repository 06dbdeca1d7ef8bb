//! Dispatch Context - 文本调度限界上下文
//!
//! 职责:
//! - 摘要/翻译请求建模
//! - 提示词模板
//! - 调度结果与错误分类

mod errors;
mod outcome;
mod prompt;
mod value_objects;

pub use errors::{DispatchError, DispatchErrorKind};
pub use outcome::DispatchOutcome;
pub use prompt::{summarize_prompt, translate_prompt};
pub use value_objects::{DispatchRequest, Operation, DEFAULT_TARGET_LANGUAGE};
