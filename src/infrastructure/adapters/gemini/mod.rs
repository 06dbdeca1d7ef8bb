//! Gemini Adapter - 生成式 API 传输实现

mod fake_gemini_client;
mod http_gemini_client;

pub use fake_gemini_client::{FakeGenerationTransport, FakeReply};
pub use http_gemini_client::*;
