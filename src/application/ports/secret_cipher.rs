//! Secret Cipher Port - 配置值加解密抽象

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CipherError {
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Encryption failed: {0}")]
    Encrypt(String),

    #[error("Decryption failed: {0}")]
    Decrypt(String),
}

/// Secret Cipher Port
///
/// 系统配置值在落库前加密，读取时解密
pub trait SecretCipherPort: Send + Sync {
    fn encrypt(&self, plaintext: &str) -> Result<String, CipherError>;

    fn decrypt(&self, ciphertext: &str) -> Result<String, CipherError>;
}
