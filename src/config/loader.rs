//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// # 环境变量示例
/// - `SILA_SERVER__PORT=8080`
/// - `SILA_GEMINI__API_KEY=...`
/// - `SILA_AUTH__SECRET_KEY=...`
/// - `SILA_SECURITY__ENCRYPTION_KEY=<base64 32 bytes>`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// `config_path` 为 None 时搜索默认配置文件
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 5060)?
        .set_default("gemini.timeout_secs", 30)?
        .set_default("gemini.pacing_delay_secs", 4)?
        .set_default("gemini.max_attempts", 3)?
        .set_default("gemini.max_chunk_chars", 20_000)?
        .set_default("database.path", "data/sila.db")?
        .set_default("database.max_connections", 5)?
        .set_default("auth.token_ttl_secs", 3600)?
        .set_default("limits.guest_max_chars", 250)?
        .set_default("limits.user_max_chars", 2000)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 配置文件
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级）
    // 前缀 SILA_，层级分隔符 __，变量名会被转换为小写
    builder = builder.add_source(
        Environment::with_prefix("SILA")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

fn invalid(msg: &str) -> ConfigError {
    ConfigError::ValidationError(msg.to_string())
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(invalid("Server port cannot be 0"));
    }

    if config.gemini.api_url.is_empty() {
        return Err(invalid("Gemini API URL cannot be empty"));
    }

    if config.gemini.max_attempts == 0 {
        return Err(invalid("Gemini max_attempts must be at least 1"));
    }

    if config.gemini.max_chunk_chars == 0 {
        return Err(invalid("Gemini max_chunk_chars must be at least 1"));
    }

    if config.database.path.is_empty() {
        return Err(invalid("Database path cannot be empty"));
    }

    if config.auth.secret_key.trim().is_empty() {
        return Err(invalid("Auth secret key cannot be empty"));
    }

    match STANDARD.decode(config.security.encryption_key.trim()) {
        Ok(key) if key.len() == 32 => {}
        Ok(key) => {
            return Err(ConfigError::ValidationError(format!(
                "Encryption key must decode to 32 bytes, got {}",
                key.len()
            )))
        }
        Err(_) => return Err(invalid("Encryption key must be valid base64")),
    }

    if config.limits.guest_max_chars > config.limits.user_max_chars {
        tracing::warn!(
            guest = config.limits.guest_max_chars,
            user = config.limits.user_max_chars,
            "Guest character limit is higher than the authenticated limit"
        );
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志，不输出任何密钥）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}:{}", config.server.host, config.server.port);
    tracing::info!("Gemini URL: {}", config.gemini.api_url);
    tracing::info!("Gemini Timeout: {}s", config.gemini.timeout_secs);
    tracing::info!(
        "Gemini Pacing: {}s, Max Attempts: {}",
        config.gemini.pacing_delay_secs,
        config.gemini.max_attempts
    );
    tracing::info!("Gemini Fallback Key: {}", if config.gemini.api_key.is_some() { "set" } else { "unset" });
    tracing::info!("Max Chunk Chars: {}", config.gemini.max_chunk_chars);
    tracing::info!("Database: {}", config.database.path);
    tracing::info!("Database Max Connections: {}", config.database.max_connections);
    tracing::info!(
        "Limits: guest {} / user {}",
        config.limits.guest_max_chars,
        config.limits.user_max_chars
    );
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const KEY_32: &str = "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA=";

    fn valid_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.auth.secret_key = "secret".to_string();
        config.security.encryption_key = KEY_32.to_string();
        config
    }

    #[test]
    fn test_validation_passes_for_valid_config() {
        assert!(validate_config(&valid_config()).is_ok());
    }

    #[test]
    fn test_validation_error_for_zero_port() {
        let mut config = valid_config();
        config.server.port = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_missing_secret() {
        let mut config = valid_config();
        config.auth.secret_key = " ".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_short_encryption_key() {
        let mut config = valid_config();
        config.security.encryption_key = STANDARD.encode([0u8; 16]);
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_validation_error_for_zero_attempts() {
        let mut config = valid_config();
        config.gemini.max_attempts = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[server]
port = 8088

[gemini]
api_key = "file-key"
pacing_delay_secs = 1

[auth]
secret_key = "file-secret"

[security]
encryption_key = "{}"
"#,
            KEY_32
        )
        .unwrap();

        let config = load_config_from_path(Some(file.path())).unwrap();

        assert_eq!(config.server.port, 8088);
        assert_eq!(config.gemini.api_key.as_deref(), Some("file-key"));
        assert_eq!(config.gemini.pacing_delay_secs, 1);
        assert_eq!(config.gemini.max_attempts, 3);
        assert_eq!(config.limits.user_max_chars, 2000);
    }
}
