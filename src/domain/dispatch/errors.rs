//! Dispatch Context - Errors

use serde::Serialize;
use thiserror::Error;

/// 单次生成调用的错误
///
/// 作为数据返回给调用方，由调用方决定如何映射为 HTTP 状态
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// 没有可用的 API Key，未发起任何网络请求
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// 429 重试耗尽
    #[error("Rate limited by provider after {attempts} attempts")]
    Throttling { attempts: u32 },

    /// 网络错误或非 2xx 状态，重试耗尽
    #[error("Transport error after {attempts} attempts: {message}")]
    Transport { attempts: u32, message: String },

    /// 2xx 响应结构不符合预期，不重试
    #[error("Failed to parse provider response: {0}")]
    Parse(String),
}

/// 错误分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchErrorKind {
    Configuration,
    Throttling,
    Transport,
    Parse,
}

impl DispatchErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DispatchErrorKind::Configuration => "configuration",
            DispatchErrorKind::Throttling => "throttling",
            DispatchErrorKind::Transport => "transport",
            DispatchErrorKind::Parse => "parse",
        }
    }
}

impl DispatchError {
    pub fn kind(&self) -> DispatchErrorKind {
        match self {
            DispatchError::Configuration(_) => DispatchErrorKind::Configuration,
            DispatchError::Throttling { .. } => DispatchErrorKind::Throttling,
            DispatchError::Transport { .. } => DispatchErrorKind::Transport,
            DispatchError::Parse(_) => DispatchErrorKind::Parse,
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        assert_eq!(
            DispatchError::Throttling { attempts: 3 }.kind(),
            DispatchErrorKind::Throttling
        );
        assert_eq!(
            DispatchError::parse("missing candidates").kind().as_str(),
            "parse"
        );
    }

    #[test]
    fn test_display_includes_attempts() {
        let err = DispatchError::Transport {
            attempts: 3,
            message: "connection refused".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Transport error after 3 attempts: connection refused"
        );
    }
}
