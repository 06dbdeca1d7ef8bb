//! HTTP Server
//!
//! 中间件栈（由外到内）: CORS → 请求追踪 → 错误日志 → 请求体上限 → 路由

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::DefaultBodyLimit;
use axum::{middleware, Router};
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::middleware::error_logging_middleware;
use super::routes::create_routes;
use super::state::AppState;
use crate::config::ServerConfig;

/// 请求体上限；登录用户单次最多 2000 字符，1MB 足够宽裕
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// 组装带全部中间件的 Router
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
        .max_age(Duration::from_secs(3600));

    create_routes()
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(middleware::from_fn(error_logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// 绑定监听地址并服务，直到 `shutdown` 完成
pub async fn serve<F>(config: &ServerConfig, state: AppState, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = config.addr();
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "HTTP server listening");

    axum::serve(listener, build_router(Arc::new(state)))
        .with_graceful_shutdown(shutdown)
        .await
}
