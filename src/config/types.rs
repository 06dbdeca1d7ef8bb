//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 生成服务配置
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// 数据库配置
    #[serde(default)]
    pub database: DatabaseConfig,

    /// 认证配置
    #[serde(default)]
    pub auth: AuthConfig,

    /// 加密配置
    #[serde(default)]
    pub security: SecurityConfig,

    /// 字符数档位
    #[serde(default)]
    pub limits: LimitsConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5060
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 生成服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiConfig {
    /// 生成接口完整 URL
    #[serde(default = "default_gemini_url")]
    pub api_url: String,

    /// 进程级 API Key，系统配置表中没有时使用
    #[serde(default)]
    pub api_key: Option<String>,

    /// 单次请求超时时间（秒）
    #[serde(default = "default_gemini_timeout")]
    pub timeout_secs: u64,

    /// 每次尝试前的固定等待（秒）
    #[serde(default = "default_pacing_delay")]
    pub pacing_delay_secs: u64,

    /// 每次逻辑调用的最大尝试次数
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// 翻译分块的最大字符数
    #[serde(default = "default_max_chunk_chars")]
    pub max_chunk_chars: usize,
}

fn default_gemini_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-flash-latest:generateContent"
        .to_string()
}

fn default_gemini_timeout() -> u64 {
    30
}

fn default_pacing_delay() -> u64 {
    4 // 约 15 次/分钟
}

fn default_max_attempts() -> u32 {
    3
}

fn default_max_chunk_chars() -> usize {
    20_000
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_url: default_gemini_url(),
            api_key: None,
            timeout_secs: default_gemini_timeout(),
            pacing_delay_secs: default_pacing_delay(),
            max_attempts: default_max_attempts(),
            max_chunk_chars: default_max_chunk_chars(),
        }
    }
}

/// 数据库配置
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// 数据库文件路径
    #[serde(default = "default_db_path")]
    pub path: String,

    /// 最大连接数
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_db_path() -> String {
    "data/sila.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            max_connections: default_max_connections(),
        }
    }
}

/// 认证配置
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// HS256 签名密钥
    #[serde(default)]
    pub secret_key: String,

    /// 签发 token 的有效期（秒）
    #[serde(default = "default_token_ttl")]
    pub token_ttl_secs: u64,
}

fn default_token_ttl() -> u64 {
    3600
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret_key: String::new(),
            token_ttl_secs: default_token_ttl(),
        }
    }
}

/// 加密配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SecurityConfig {
    /// base64 编码的 32 字节 AES-256 密钥
    #[serde(default)]
    pub encryption_key: String,
}

/// 字符数档位
#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    #[serde(default = "default_guest_max_chars")]
    pub guest_max_chars: usize,

    #[serde(default = "default_user_max_chars")]
    pub user_max_chars: usize,
}

fn default_guest_max_chars() -> usize {
    250
}

fn default_user_max_chars() -> usize {
    2000
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            guest_max_chars: default_guest_max_chars(),
            user_max_chars: default_user_max_chars(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
