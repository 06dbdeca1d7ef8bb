//! Memory Layer - In-Memory State Management
//!
//! 系统配置的内存实现，用于测试和无数据库运行

mod system_config_store;

pub use system_config_store::InMemorySystemConfigRepository;
