//! Fake Gemini Client - 用于测试的生成服务
//!
//! 按脚本依次返回预设响应，或原样回显 prompt

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::application::ports::{
    GenerateContentRequest, GenerationTransportPort, TransportError, TransportResponse,
};

/// 预设响应
#[derive(Debug, Clone)]
pub enum FakeReply {
    /// 200，候选文本为给定内容
    Text(String),
    /// 指定状态码，响应体为简单错误信息
    Status(u16),
    /// 指定状态码与原始响应体
    Body(u16, String),
    /// 未拿到 HTTP 响应
    Error(TransportError),
}

impl FakeReply {
    fn into_result(self) -> Result<TransportResponse, TransportError> {
        match self {
            FakeReply::Text(text) => Ok(TransportResponse::new(200, candidate_body(&text))),
            FakeReply::Status(status) => Ok(TransportResponse::new(
                status,
                format!(r#"{{"error":{{"code":{}}}}}"#, status),
            )),
            FakeReply::Body(status, body) => Ok(TransportResponse::new(status, body)),
            FakeReply::Error(err) => Err(err),
        }
    }
}

fn candidate_body(text: &str) -> String {
    serde_json::json!({
        "candidates": [{"content": {"parts": [{"text": text}]}}]
    })
    .to_string()
}

#[derive(Debug, Default)]
struct Recorded {
    prompts: Vec<String>,
    api_keys: Vec<String>,
}

/// Fake Generation Transport
///
/// 脚本耗尽后返回网络错误；echo 模式下总是回显 prompt
pub struct FakeGenerationTransport {
    script: Mutex<Option<VecDeque<FakeReply>>>,
    recorded: Mutex<Recorded>,
}

impl FakeGenerationTransport {
    /// 按顺序返回给定响应
    pub fn scripted(replies: Vec<FakeReply>) -> Self {
        Self {
            script: Mutex::new(Some(replies.into())),
            recorded: Mutex::new(Recorded::default()),
        }
    }

    /// 回显模式
    pub fn echo() -> Self {
        Self {
            script: Mutex::new(None),
            recorded: Mutex::new(Recorded::default()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.recorded
            .lock()
            .map(|r| r.prompts.len())
            .unwrap_or_default()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.recorded
            .lock()
            .map(|r| r.prompts.clone())
            .unwrap_or_default()
    }

    pub fn api_keys(&self) -> Vec<String> {
        self.recorded
            .lock()
            .map(|r| r.api_keys.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl GenerationTransportPort for FakeGenerationTransport {
    async fn send(
        &self,
        api_key: &str,
        request: &GenerateContentRequest,
    ) -> Result<TransportResponse, TransportError> {
        let prompt = request.prompt().unwrap_or_default().to_string();

        if let Ok(mut recorded) = self.recorded.lock() {
            recorded.prompts.push(prompt.clone());
            recorded.api_keys.push(api_key.to_string());
        }

        let reply = match self.script.lock() {
            Ok(mut script) => match script.as_mut() {
                Some(queue) => queue.pop_front().unwrap_or_else(|| {
                    FakeReply::Error(TransportError::Network("no scripted reply left".to_string()))
                }),
                None => FakeReply::Text(prompt),
            },
            Err(_) => FakeReply::Error(TransportError::Network("script lock poisoned".to_string())),
        };

        tracing::debug!(reply = ?reply, "FakeGenerationTransport: returning reply");

        reply.into_result()
    }
}
