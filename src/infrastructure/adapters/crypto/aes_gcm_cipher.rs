//! AES-256-GCM Cipher
//!
//! 密文格式: base64(nonce[12] || ciphertext+tag)

use aes_gcm::aead::{Aead, AeadCore, KeyInit, OsRng};
use aes_gcm::{Aes256Gcm, Nonce};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::application::ports::{CipherError, SecretCipherPort};

const KEY_LEN: usize = 32;
const NONCE_LEN: usize = 12;

/// AES-256-GCM 实现的 SecretCipherPort
pub struct AesGcmCipher {
    cipher: Aes256Gcm,
}

impl AesGcmCipher {
    pub fn from_key_bytes(key: &[u8]) -> Result<Self, CipherError> {
        if key.len() != KEY_LEN {
            return Err(CipherError::InvalidKey(format!(
                "expected {} bytes, got {}",
                KEY_LEN,
                key.len()
            )));
        }

        let cipher =
            Aes256Gcm::new_from_slice(key).map_err(|e| CipherError::InvalidKey(e.to_string()))?;
        Ok(Self { cipher })
    }

    /// 从 base64 编码的 32 字节密钥创建
    pub fn from_base64(encoded: &str) -> Result<Self, CipherError> {
        let key = STANDARD
            .decode(encoded.trim())
            .map_err(|e| CipherError::InvalidKey(format!("invalid base64: {}", e)))?;
        Self::from_key_bytes(&key)
    }

    /// 生成一个新的随机密钥（base64）
    pub fn generate_key() -> String {
        STANDARD.encode(Aes256Gcm::generate_key(&mut OsRng))
    }
}

impl SecretCipherPort for AesGcmCipher {
    fn encrypt(&self, plaintext: &str) -> Result<String, CipherError> {
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let ciphertext = self
            .cipher
            .encrypt(&nonce, plaintext.as_bytes())
            .map_err(|e| CipherError::Encrypt(e.to_string()))?;

        let mut payload = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        payload.extend_from_slice(&nonce);
        payload.extend_from_slice(&ciphertext);
        Ok(STANDARD.encode(payload))
    }

    fn decrypt(&self, ciphertext: &str) -> Result<String, CipherError> {
        let payload = STANDARD
            .decode(ciphertext.trim())
            .map_err(|e| CipherError::Decrypt(format!("invalid base64: {}", e)))?;
        if payload.len() <= NONCE_LEN {
            return Err(CipherError::Decrypt("payload too short".to_string()));
        }

        let (nonce, body) = payload.split_at(NONCE_LEN);
        let plaintext = self
            .cipher
            .decrypt(Nonce::from_slice(nonce), body)
            .map_err(|e| CipherError::Decrypt(e.to_string()))?;

        String::from_utf8(plaintext).map_err(|e| CipherError::Decrypt(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encrypt_then_decrypt() {
        let cipher = AesGcmCipher::from_key_bytes(&[42u8; 32]).unwrap();

        let encrypted = cipher.encrypt("AIza-secret").unwrap();

        assert_ne!(encrypted, "AIza-secret");
        assert_eq!(cipher.decrypt(&encrypted).unwrap(), "AIza-secret");
    }

    #[test]
    fn test_nonce_differs_per_encryption() {
        let cipher = AesGcmCipher::from_key_bytes(&[42u8; 32]).unwrap();
        assert_ne!(cipher.encrypt("same").unwrap(), cipher.encrypt("same").unwrap());
    }

    #[test]
    fn test_wrong_key_fails_to_decrypt() {
        let a = AesGcmCipher::from_key_bytes(&[1u8; 32]).unwrap();
        let b = AesGcmCipher::from_key_bytes(&[2u8; 32]).unwrap();

        let encrypted = a.encrypt("value").unwrap();

        assert!(matches!(b.decrypt(&encrypted), Err(CipherError::Decrypt(_))));
    }

    #[test]
    fn test_invalid_keys_rejected() {
        assert!(matches!(
            AesGcmCipher::from_key_bytes(&[0u8; 16]),
            Err(CipherError::InvalidKey(_))
        ));
        assert!(matches!(
            AesGcmCipher::from_base64("not base64!"),
            Err(CipherError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_generated_key_is_usable() {
        let key = AesGcmCipher::generate_key();
        let cipher = AesGcmCipher::from_base64(&key).unwrap();
        assert_eq!(cipher.decrypt(&cipher.encrypt("x").unwrap()).unwrap(), "x");
    }
}
