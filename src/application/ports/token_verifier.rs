//! Token Verifier Port - Bearer Token 校验抽象

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Malformed token")]
    Malformed,

    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("Token expired")]
    Expired,

    #[error("Invalid token claims: {0}")]
    InvalidClaims(String),
}

/// 通过校验的调用方
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: i64,
}

/// Token Verifier Port
pub trait TokenVerifierPort: Send + Sync {
    fn verify(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}
