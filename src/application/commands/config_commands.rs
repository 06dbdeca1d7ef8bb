//! System Config Commands

/// 更新系统配置命令（value 为明文，落库前加密）
#[derive(Debug, Clone)]
pub struct UpdateSystemConfig {
    pub key: String,
    pub value: String,
    pub description: Option<String>,
}
