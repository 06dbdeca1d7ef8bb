//! 应用层错误定义
//!
//! 统一的命令/查询错误类型

use thiserror::Error;

use crate::domain::dispatch::DispatchError;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 验证错误
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 超出字符数限制
    #[error("{}", limit_message(.limit, .authenticated))]
    LimitExceeded { limit: usize, authenticated: bool },

    /// 外部生成服务调用失败
    #[error("Dispatch failed at chunk {chunk_index}: {error}")]
    DispatchFailed {
        chunk_index: usize,
        error: DispatchError,
    },

    /// 仓储错误
    #[error("Repository error: {0}")]
    RepositoryError(String),

    /// 内部错误
    #[error("Internal error: {0}")]
    InternalError(String),
}

fn limit_message(limit: &usize, authenticated: &bool) -> String {
    if *authenticated {
        format!("Character limit exceeded ({}).", limit)
    } else {
        format!("Character limit exceeded ({}). Login to increase limit.", limit)
    }
}

impl ApplicationError {
    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }
}

impl From<crate::application::ports::RepositoryError> for ApplicationError {
    fn from(err: crate::application::ports::RepositoryError) -> Self {
        Self::RepositoryError(err.to_string())
    }
}

impl From<crate::application::ports::CipherError> for ApplicationError {
    fn from(err: crate::application::ports::CipherError) -> Self {
        Self::InternalError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_message_for_guest() {
        let err = ApplicationError::LimitExceeded {
            limit: 250,
            authenticated: false,
        };
        assert_eq!(
            err.to_string(),
            "Character limit exceeded (250). Login to increase limit."
        );
    }

    #[test]
    fn test_limit_message_for_user() {
        let err = ApplicationError::LimitExceeded {
            limit: 2000,
            authenticated: true,
        };
        assert_eq!(err.to_string(), "Character limit exceeded (2000).");
    }
}
