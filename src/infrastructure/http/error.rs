//! HTTP Error Handling
//!
//! 所有错误都以 HTTP 200 + errno 的统一格式返回

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::application::ApplicationError;
use crate::domain::dispatch::DispatchError;

/// 统一错误响应格式
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub errno: i32,
    pub error: String,
    pub data: Option<()>,
}

impl ErrorResponse {
    pub fn new(errno: i32, error: impl Into<String>) -> Self {
        Self {
            errno,
            error: error.into(),
            data: None,
        }
    }
}

/// 错误码定义
pub mod errno {
    pub const BAD_REQUEST: i32 = 400;
    pub const UNAUTHORIZED: i32 = 401;
    pub const FORBIDDEN: i32 = 403;
    pub const TOO_MANY_REQUESTS: i32 = 429;
    pub const INTERNAL_ERROR: i32 = 500;
    pub const BAD_GATEWAY: i32 = 502;
    pub const SERVICE_UNAVAILABLE: i32 = 503;
}

/// API 错误
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized(String),
    Forbidden(String),
    TooManyRequests(String),
    Internal(String),
    BadGateway(String),
    ServiceUnavailable(String),
}

impl ApiError {
    pub fn errno(&self) -> i32 {
        match self {
            ApiError::BadRequest(_) => errno::BAD_REQUEST,
            ApiError::Unauthorized(_) => errno::UNAUTHORIZED,
            ApiError::Forbidden(_) => errno::FORBIDDEN,
            ApiError::TooManyRequests(_) => errno::TOO_MANY_REQUESTS,
            ApiError::Internal(_) => errno::INTERNAL_ERROR,
            ApiError::BadGateway(_) => errno::BAD_GATEWAY,
            ApiError::ServiceUnavailable(_) => errno::SERVICE_UNAVAILABLE,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Forbidden(msg)
            | ApiError::TooManyRequests(msg)
            | ApiError::Internal(msg)
            | ApiError::BadGateway(msg)
            | ApiError::ServiceUnavailable(msg) => msg,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let errno = self.errno();
        let msg = self.message();

        match &self {
            ApiError::Internal(_) | ApiError::ServiceUnavailable(_) | ApiError::BadGateway(_) => {
                tracing::error!(errno = errno, error = %msg, "Request failed");
            }
            ApiError::TooManyRequests(_) => {
                tracing::warn!(errno = errno, error = %msg, "Upstream rate limit exhausted");
            }
            _ => {
                tracing::warn!(errno = errno, error = %msg, "Request rejected");
            }
        }

        (StatusCode::OK, Json(ErrorResponse::new(errno, msg))).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(e: ApplicationError) -> Self {
        match e {
            ApplicationError::DispatchFailed {
                error: DispatchError::Configuration(_),
                ..
            } => ApiError::ServiceUnavailable(e.to_string()),
            ApplicationError::DispatchFailed {
                error: DispatchError::Throttling { .. },
                ..
            } => ApiError::TooManyRequests(e.to_string()),
            // Transport / Parse
            ApplicationError::DispatchFailed { .. } => ApiError::BadGateway(e.to_string()),
            ApplicationError::ValidationError(msg) => ApiError::BadRequest(msg),
            ApplicationError::LimitExceeded { .. } => ApiError::Forbidden(e.to_string()),
            ApplicationError::RepositoryError(msg) => ApiError::Internal(msg),
            ApplicationError::InternalError(msg) => ApiError::Internal(msg),
        }
    }
}
