//! Sila - 文本摘要/翻译服务
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Dispatch: 调度请求、结果与错误分类，prompt 模板
//! - History: 历史条目与分页
//! - Text Splitter: 按分隔符优先级切块
//!
//! 应用层 (application/):
//! - Ports: 端口定义（GenerationTransport, Repositories, SecretCipher, TokenVerifier）
//! - Pipeline: 分块 + 限速 + 重试的调度流水线
//! - Commands: CQRS 命令处理器
//! - Queries: CQRS 查询处理器
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API
//! - Adapters: Gemini Client, AES-GCM Cipher, HS256 Token Service
//! - Persistence: SQLite 存储
//! - Memory: 系统配置内存实现

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
