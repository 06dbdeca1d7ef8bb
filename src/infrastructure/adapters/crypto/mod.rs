//! Crypto Adapter - 系统配置值加解密

mod aes_gcm_cipher;

pub use aes_gcm_cipher::AesGcmCipher;
