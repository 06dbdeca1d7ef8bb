//! 应用层 - 命令（写操作）
//!
//! CQRS 命令侧：处理所有写操作

mod config_commands;
mod tool_commands;

pub mod handlers;

pub use config_commands::*;
pub use tool_commands::*;
