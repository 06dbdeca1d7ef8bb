//! Dispatch Context - Value Objects

use serde::{Deserialize, Serialize};

/// 未指定目标语言时使用的默认值
pub const DEFAULT_TARGET_LANGUAGE: &str = "French";

/// 调度操作类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// 摘要
    Summarize,
    /// 翻译
    Translate,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Summarize => "summarize",
            Operation::Translate => "translate",
        }
    }
}

impl std::str::FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "summarize" => Ok(Operation::Summarize),
            "translate" => Ok(Operation::Translate),
            other => Err(format!("Unknown operation: {}", other)),
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 调度请求
///
/// 不变量:
/// - 构造后不可变
/// - Translate 总是带目标语言；Summarize 不带目标语言
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchRequest {
    operation: Operation,
    text: String,
    target_language: Option<String>,
}

impl DispatchRequest {
    /// 创建摘要请求
    pub fn summarize(text: impl Into<String>) -> Self {
        Self {
            operation: Operation::Summarize,
            text: text.into(),
            target_language: None,
        }
    }

    /// 创建翻译请求，目标语言为自由文本标签，原样写入提示词
    pub fn translate(text: impl Into<String>, target_language: impl Into<String>) -> Self {
        Self {
            operation: Operation::Translate,
            text: text.into(),
            target_language: Some(target_language.into()),
        }
    }

    // Getters
    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn target_language(&self) -> Option<&str> {
        self.target_language.as_deref()
    }
}
