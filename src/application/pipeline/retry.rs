//! 重试策略
//!
//! 每次尝试的结果由 [`RetryPolicy::classify`] 归类为成功、致命错误或
//! 带退避时长的可重试失败，调度循环只负责按结果执行

use std::time::Duration;

use crate::application::ports::{GenerateContentResponse, TransportError, TransportResponse};
use crate::domain::dispatch::DispatchError;

/// 每次尝试前的固定间隔
pub const DEFAULT_PACING_DELAY: Duration = Duration::from_secs(4);

/// 最大尝试次数（含首次）
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// 网络错误/非 2xx 状态后的等待时长
pub const TRANSIENT_RETRY_DELAY: Duration = Duration::from_secs(2);

/// 429 指数退避的基本单位
pub const THROTTLE_BACKOFF_UNIT: Duration = Duration::from_secs(1);

/// 重试策略
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// 每次尝试前的固定等待
    pub pacing_delay: Duration,
    /// 最大尝试次数，至少为 1
    pub max_attempts: u32,
    /// 传输类失败后的等待
    pub transient_delay: Duration,
    /// 429 退避单位
    pub backoff_unit: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            pacing_delay: DEFAULT_PACING_DELAY,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            transient_delay: TRANSIENT_RETRY_DELAY,
            backoff_unit: THROTTLE_BACKOFF_UNIT,
        }
    }
}

/// 可重试的失败
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryableFailure {
    /// HTTP 429
    Throttled,
    /// 网络错误、超时或其他非 2xx 状态
    Transport(String),
}

impl RetryableFailure {
    /// 重试耗尽后转换为最终错误
    pub fn into_error(self, attempts: u32) -> DispatchError {
        match self {
            RetryableFailure::Throttled => DispatchError::Throttling { attempts },
            RetryableFailure::Transport(message) => DispatchError::Transport { attempts, message },
        }
    }
}

impl std::fmt::Display for RetryableFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RetryableFailure::Throttled => f.write_str("rate limited (429)"),
            RetryableFailure::Transport(message) => f.write_str(message),
        }
    }
}

/// 单次尝试的归类结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// 解析出的文本
    Success(String),
    /// 不可重试的错误
    Fatal(DispatchError),
    /// 等待 `delay` 后重试
    Retry {
        delay: Duration,
        failure: RetryableFailure,
    },
}

impl RetryPolicy {
    pub fn new(pacing_delay: Duration, max_attempts: u32, transient_delay: Duration) -> Self {
        Self {
            pacing_delay,
            max_attempts: max_attempts.max(1),
            transient_delay,
            backoff_unit: THROTTLE_BACKOFF_UNIT,
        }
    }

    /// 不等待的策略（测试用）
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            backoff_unit: Duration::ZERO,
            ..Self::new(Duration::ZERO, max_attempts, Duration::ZERO)
        }
    }

    /// 429 退避：2^attempt 个单位 + 固定间隔（attempt 从 0 开始）
    pub fn throttle_backoff(&self, attempt: u32) -> Duration {
        let factor = 2u32.checked_pow(attempt).unwrap_or(u32::MAX);
        self.backoff_unit.saturating_mul(factor) + self.pacing_delay
    }

    /// 归类一次尝试的结果
    pub fn classify(
        &self,
        attempt: u32,
        result: Result<TransportResponse, TransportError>,
    ) -> AttemptOutcome {
        let response = match result {
            Ok(response) => response,
            Err(e) => {
                return AttemptOutcome::Retry {
                    delay: self.transient_delay,
                    failure: RetryableFailure::Transport(e.to_string()),
                }
            }
        };

        if response.is_rate_limited() {
            return AttemptOutcome::Retry {
                delay: self.throttle_backoff(attempt),
                failure: RetryableFailure::Throttled,
            };
        }

        if !response.is_success() {
            return AttemptOutcome::Retry {
                delay: self.transient_delay,
                failure: RetryableFailure::Transport(format!(
                    "HTTP {}: {}",
                    response.status,
                    truncate(&response.body, 200)
                )),
            };
        }

        match parse_first_text(&response.body) {
            Ok(text) => AttemptOutcome::Success(text),
            Err(e) => AttemptOutcome::Fatal(e),
        }
    }
}

/// 读取 candidates[0].content.parts[0].text
fn parse_first_text(body: &str) -> Result<String, DispatchError> {
    let parsed: GenerateContentResponse =
        serde_json::from_str(body).map_err(|e| DispatchError::parse(e.to_string()))?;

    parsed
        .first_text()
        .map(str::to_string)
        .ok_or_else(|| DispatchError::parse("response contained no candidate text"))
}

fn truncate(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((offset, _)) => &s[..offset],
        None => s,
    }
}
