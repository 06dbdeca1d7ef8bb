//! HTTP Gemini Client - 调用外部生成式 API
//!
//! 实现 GenerationTransportPort trait
//!
//! 外部 API:
//! POST {api_url}?key={api_key}
//! Request: {"contents":[{"parts":[{"text":"..."}]}]}  (JSON)
//! Response: {"candidates":[{"content":{"parts":[{"text":"..."}]}}]}

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::application::ports::{
    GenerateContentRequest, GenerationTransportPort, TransportError, TransportResponse,
};

/// 默认生成接口地址
pub const DEFAULT_GEMINI_API_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-flash-latest:generateContent";

/// HTTP Gemini 客户端配置
#[derive(Debug, Clone)]
pub struct HttpGeminiClientConfig {
    /// 生成接口完整 URL
    pub api_url: String,
    /// 单次请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for HttpGeminiClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_GEMINI_API_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

impl HttpGeminiClientConfig {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// HTTP Gemini 客户端
///
/// 只发送单次请求，不做重试
pub struct HttpGeminiClient {
    client: Client,
    config: HttpGeminiClientConfig,
}

impl HttpGeminiClient {
    pub fn new(config: HttpGeminiClientConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TransportError::Network(e.to_string()))?;

        Ok(Self { client, config })
    }
}

fn map_reqwest_error(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout(e.to_string())
    } else if e.is_connect() {
        TransportError::Connect(format!("Cannot connect to generation service: {}", e))
    } else {
        TransportError::Network(e.to_string())
    }
}

#[async_trait]
impl GenerationTransportPort for HttpGeminiClient {
    async fn send(
        &self,
        api_key: &str,
        request: &GenerateContentRequest,
    ) -> Result<TransportResponse, TransportError> {
        tracing::debug!(
            url = %self.config.api_url,
            prompt_len = request.prompt().map(str::len).unwrap_or(0),
            "Sending generate content request"
        );

        let response = self
            .client
            .post(&self.config.api_url)
            .query(&[("key", api_key)])
            .json(request)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(map_reqwest_error)?;

        tracing::debug!(status = status, body_len = body.len(), "Generate content response received");

        Ok(TransportResponse::new(status, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = HttpGeminiClientConfig::default();
        assert_eq!(config.api_url, DEFAULT_GEMINI_API_URL);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_config_builder() {
        let config = HttpGeminiClientConfig::new("http://127.0.0.1:9000/generate").with_timeout(5);
        assert_eq!(config.api_url, "http://127.0.0.1:9000/generate");
        assert_eq!(config.timeout_secs, 5);
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        // 端口 9 (discard) 在测试环境中通常没有监听
        let client =
            HttpGeminiClient::new(HttpGeminiClientConfig::new("http://127.0.0.1:9/generate").with_timeout(2))
                .unwrap();

        let result = client
            .send("key", &GenerateContentRequest::from_prompt("hi"))
            .await;

        assert!(result.is_err());
    }
}
