//! Auth Extractors
//!
//! - `CurrentUser`: 必须携带有效 Bearer token，否则 401
//! - `MaybeUser`: token 缺失或无效时视为匿名

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use http::header::AUTHORIZATION;
use http::request::Parts;
use std::convert::Infallible;
use std::sync::Arc;

use super::error::ApiError;
use super::state::AppState;
use crate::application::{AuthError, AuthenticatedUser};

fn bearer_token(parts: &Parts) -> Option<&str> {
    let value = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

fn authenticate(parts: &Parts, state: &AppState) -> Result<AuthenticatedUser, Option<AuthError>> {
    let token = bearer_token(parts).ok_or(None)?;
    state.token_verifier.verify(token).map_err(Some)
}

/// 已认证调用方
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser(pub AuthenticatedUser);

#[async_trait]
impl FromRequestParts<Arc<AppState>> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        match authenticate(parts, state) {
            Ok(user) => Ok(CurrentUser(user)),
            Err(None) => Err(ApiError::Unauthorized("Not authenticated".to_string())),
            Err(Some(e)) => {
                tracing::debug!(error = %e, "Bearer token rejected");
                Err(ApiError::Unauthorized(
                    "Could not validate credentials".to_string(),
                ))
            }
        }
    }
}

/// 可选认证调用方
#[derive(Debug, Clone, Copy)]
pub struct MaybeUser(pub Option<AuthenticatedUser>);

#[async_trait]
impl FromRequestParts<Arc<AppState>> for MaybeUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        match authenticate(parts, state) {
            Ok(user) => Ok(MaybeUser(Some(user))),
            Err(None) => Ok(MaybeUser(None)),
            Err(Some(e)) => {
                tracing::debug!(error = %e, "Invalid bearer token, treating caller as anonymous");
                Ok(MaybeUser(None))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Request;

    fn parts(header: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/");
        if let Some(value) = header {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token(&parts(Some("Bearer abc"))), Some("abc"));
        assert_eq!(bearer_token(&parts(Some("bearer  abc "))), Some("abc"));
        assert_eq!(bearer_token(&parts(Some("Basic abc"))), None);
        assert_eq!(bearer_token(&parts(Some("Bearer "))), None);
        assert_eq!(bearer_token(&parts(None)), None);
    }
}
