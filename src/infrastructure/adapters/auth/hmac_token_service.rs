//! HMAC Token Service - HS256 JWT
//!
//! token = base64url(header) "." base64url(claims) "." base64url(hmac_sha256)
//! claims: {"sub": "<user id>", "exp": <unix seconds>}

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::Utc;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::application::ports::{AuthError, AuthenticatedUser, TokenVerifierPort};

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Serialize, Deserialize)]
struct Header {
    alg: String,
    #[serde(default)]
    typ: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: serde_json::Value,
    exp: i64,
}

impl Claims {
    /// sub 可以是数字或数字字符串
    fn user_id(&self) -> Result<i64, AuthError> {
        match &self.sub {
            serde_json::Value::Number(n) => n
                .as_i64()
                .ok_or_else(|| AuthError::InvalidClaims("sub is not an integer".to_string())),
            serde_json::Value::String(s) => s
                .parse()
                .map_err(|_| AuthError::InvalidClaims("sub is not an integer".to_string())),
            _ => Err(AuthError::InvalidClaims("missing sub".to_string())),
        }
    }
}

/// HS256 token 签发与校验
pub struct HmacTokenService {
    secret: Vec<u8>,
    ttl_secs: i64,
}

impl HmacTokenService {
    pub fn new(secret: impl AsRef<[u8]>, ttl_secs: u64) -> Self {
        Self {
            secret: secret.as_ref().to_vec(),
            ttl_secs: i64::try_from(ttl_secs).unwrap_or(i64::MAX),
        }
    }

    fn mac(&self) -> Result<HmacSha256, AuthError> {
        HmacSha256::new_from_slice(&self.secret)
            .map_err(|e| AuthError::InvalidClaims(format!("invalid secret: {}", e)))
    }

    fn encode_json<T: Serialize>(value: &T) -> Result<String, AuthError> {
        let json =
            serde_json::to_vec(value).map_err(|e| AuthError::InvalidClaims(e.to_string()))?;
        Ok(URL_SAFE_NO_PAD.encode(json))
    }

    /// 为用户签发 token
    pub fn issue(&self, user_id: i64) -> Result<String, AuthError> {
        self.issue_with_expiry(user_id, Utc::now().timestamp().saturating_add(self.ttl_secs))
    }

    fn issue_with_expiry(&self, user_id: i64, exp: i64) -> Result<String, AuthError> {
        let header = Self::encode_json(&Header {
            alg: "HS256".to_string(),
            typ: "JWT".to_string(),
        })?;
        let claims = Self::encode_json(&Claims {
            sub: serde_json::Value::String(user_id.to_string()),
            exp,
        })?;
        let signing_input = format!("{}.{}", header, claims);

        let mut mac = self.mac()?;
        mac.update(signing_input.as_bytes());
        let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

        Ok(format!("{}.{}", signing_input, signature))
    }
}

impl TokenVerifierPort for HmacTokenService {
    fn verify(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let (signing_input, signature) = token.rsplit_once('.').ok_or(AuthError::Malformed)?;
        let mut parts = signing_input.split('.');
        let (header, claims) = match (parts.next(), parts.next(), parts.next()) {
            (Some(h), Some(c), None) => (h, c),
            _ => return Err(AuthError::Malformed),
        };

        let header: Header = URL_SAFE_NO_PAD
            .decode(header)
            .ok()
            .and_then(|bytes| serde_json::from_slice(&bytes).ok())
            .ok_or(AuthError::Malformed)?;
        if header.alg != "HS256" {
            return Err(AuthError::InvalidClaims(format!("unsupported alg {}", header.alg)));
        }

        let signature = URL_SAFE_NO_PAD
            .decode(signature)
            .map_err(|_| AuthError::Malformed)?;
        let mut mac = self.mac()?;
        mac.update(signing_input.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| AuthError::InvalidSignature)?;

        let claims: Claims = URL_SAFE_NO_PAD
            .decode(claims)
            .ok()
            .and_then(|bytes| serde_json::from_slice(&bytes).ok())
            .ok_or(AuthError::Malformed)?;

        if claims.exp <= Utc::now().timestamp() {
            return Err(AuthError::Expired);
        }

        Ok(AuthenticatedUser {
            id: claims.user_id()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issued_token_verifies() {
        let service = HmacTokenService::new("secret", 3600);

        let token = service.issue(42).unwrap();

        assert_eq!(service.verify(&token), Ok(AuthenticatedUser { id: 42 }));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let issuer = HmacTokenService::new("secret-a", 3600);
        let verifier = HmacTokenService::new("secret-b", 3600);

        let token = issuer.issue(1).unwrap();

        assert_eq!(verifier.verify(&token), Err(AuthError::InvalidSignature));
    }

    #[test]
    fn test_expired_token_rejected() {
        let service = HmacTokenService::new("secret", 3600);

        let token = service.issue_with_expiry(1, Utc::now().timestamp() - 10).unwrap();

        assert_eq!(service.verify(&token), Err(AuthError::Expired));
    }

    #[test]
    fn test_tampered_claims_rejected() {
        let service = HmacTokenService::new("secret", 3600);
        let token = service.issue(1).unwrap();
        let parts: Vec<&str> = token.split('.').collect();
        let forged_claims = URL_SAFE_NO_PAD.encode(r#"{"sub":"2","exp":9999999999}"#);

        let forged = format!("{}.{}.{}", parts[0], forged_claims, parts[2]);

        assert_eq!(service.verify(&forged), Err(AuthError::InvalidSignature));
    }

    #[test]
    fn test_garbage_is_malformed() {
        let service = HmacTokenService::new("secret", 3600);
        assert_eq!(service.verify("not-a-token"), Err(AuthError::Malformed));
        assert_eq!(service.verify("a.b.c.d"), Err(AuthError::Malformed));
    }
}
