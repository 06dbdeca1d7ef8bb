//! Dispatch Context - Outcome

use super::DispatchError;

/// 一次调度的聚合结果
///
/// 成功时为所有片段结果以单个空格拼接的全文；
/// 失败时为第一个失败片段的索引（从 0 开始）及其错误，部分结果被丢弃
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Completed { text: String, chunk_count: usize },
    Failed { chunk_index: usize, error: DispatchError },
}

impl DispatchOutcome {
    pub fn completed(text: impl Into<String>, chunk_count: usize) -> Self {
        Self::Completed {
            text: text.into(),
            chunk_count,
        }
    }

    pub fn failed(chunk_index: usize, error: DispatchError) -> Self {
        Self::Failed { chunk_index, error }
    }

    /// 成功时的文本
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Completed { text, .. } => Some(text),
            Self::Failed { .. } => None,
        }
    }

    /// 失败时的错误
    pub fn error(&self) -> Option<&DispatchError> {
        match self {
            Self::Completed { .. } => None,
            Self::Failed { error, .. } => Some(error),
        }
    }

    pub fn into_result(self) -> Result<String, (usize, DispatchError)> {
        match self {
            Self::Completed { text, .. } => Ok(text),
            Self::Failed { chunk_index, error } => Err((chunk_index, error)),
        }
    }
}
