//! Generation Transport Port - 生成式 API 传输抽象
//!
//! 只负责发出单次 HTTP 请求并返回原始状态码与响应体，
//! 重试、限速和解析由 application/pipeline 负责

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 传输层错误（未拿到 HTTP 响应）
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    #[error("Request timeout: {0}")]
    Timeout(String),

    #[error("Connection error: {0}")]
    Connect(String),

    #[error("Network error: {0}")]
    Network(String),
}

/// 原始 HTTP 响应
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_rate_limited(&self) -> bool {
        self.status == 429
    }
}

// ============================================================================
// Wire format
// ============================================================================

/// 请求体: {"contents":[{"parts":[{"text": <prompt>}]}]}
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    pub text: String,
}

impl GenerateContentRequest {
    pub fn from_prompt(prompt: impl Into<String>) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.into(),
                }],
            }],
        }
    }

    pub fn prompt(&self) -> Option<&str> {
        self.contents
            .first()
            .and_then(|c| c.parts.first())
            .map(|p| p.text.as_str())
    }
}

/// 响应体: {"candidates":[{"content":{"parts":[{"text": <result>}]}}]}
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    pub content: Option<Content>,
}

impl GenerateContentResponse {
    /// 读取第一个候选的第一个 part 的文本
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .and_then(|c| c.parts.first())
            .map(|p| p.text.as_str())
    }
}

/// Generation Transport Port
///
/// 外部生成式 API 的抽象接口
#[async_trait]
pub trait GenerationTransportPort: Send + Sync {
    /// 发送一次生成请求
    ///
    /// 拿到任意 HTTP 响应（包括 4xx/5xx）都返回 Ok，由调用方判断状态码
    async fn send(
        &self,
        api_key: &str,
        request: &GenerateContentRequest,
    ) -> Result<TransportResponse, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_wire_shape() {
        let request = GenerateContentRequest::from_prompt("hi");
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json, serde_json::json!({"contents": [{"parts": [{"text": "hi"}]}]}));
        assert_eq!(request.prompt(), Some("hi"));
    }

    #[test]
    fn test_response_first_text() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"Bonjour"},{"text":"ignored"}]}}]}"#;
        let response: GenerateContentResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.first_text(), Some("Bonjour"));
    }

    #[test]
    fn test_response_without_candidates() {
        let response: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(response.first_text(), None);
    }

    #[test]
    fn test_status_helpers() {
        assert!(TransportResponse::new(200, "").is_success());
        assert!(TransportResponse::new(429, "").is_rate_limited());
        assert!(!TransportResponse::new(503, "").is_success());
    }
}
