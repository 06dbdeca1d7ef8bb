//! HTTP Middleware
//!
//! 请求耗时 + HTTP 状态码错误日志

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

/// 超过该耗时的请求记为慢请求（翻译长文本时单次调度可达数十秒）
const SLOW_REQUEST_MS: u128 = 30_000;

/// HTTP 状态码错误日志中间件
///
/// 业务错误（errno != 0）在 ApiError::into_response() 中记录，
/// 这里只处理框架层面的 4xx/5xx（如 JSON 解析失败、路由不存在）和慢请求
pub async fn error_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;
    let status = response.status();
    let elapsed_ms = started.elapsed().as_millis();

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            elapsed_ms = elapsed_ms as u64,
            "HTTP server error"
        );
    } else if status.is_client_error() {
        tracing::warn!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            elapsed_ms = elapsed_ms as u64,
            "HTTP client error"
        );
    } else if elapsed_ms >= SLOW_REQUEST_MS {
        tracing::info!(
            method = %method,
            path = %path,
            elapsed_ms = elapsed_ms as u64,
            "Slow request"
        );
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request as HttpRequest, StatusCode},
        routing::post,
        Json, Router,
    };
    use serde_json::Value;
    use tower::util::ServiceExt;

    async fn echo_handler(Json(body): Json<Value>) -> Json<Value> {
        Json(body)
    }

    fn create_test_router() -> Router {
        Router::new()
            .route("/api/tools/summarize", post(echo_handler))
            .layer(axum::middleware::from_fn(error_logging_middleware))
    }

    #[tokio::test]
    async fn test_passes_through_success() {
        let request = HttpRequest::builder()
            .method("POST")
            .uri("/api/tools/summarize")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"text":"hi"}"#))
            .unwrap();

        let response = create_test_router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_malformed_json_is_client_error() {
        let request = HttpRequest::builder()
            .method("POST")
            .uri("/api/tools/summarize")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let response = create_test_router().oneshot(request).await.unwrap();
        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let request = HttpRequest::builder()
            .uri("/api/unknown")
            .body(Body::empty())
            .unwrap();

        let response = create_test_router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
