//! Auth Adapter - Bearer Token 签发与校验

mod hmac_token_service;

pub use hmac_token_service::HmacTokenService;
