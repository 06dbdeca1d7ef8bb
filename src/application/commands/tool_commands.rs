//! Tool Commands - 摘要/翻译

use crate::application::ports::AuthenticatedUser;

/// 匿名调用方默认字符上限
pub const DEFAULT_GUEST_MAX_CHARS: usize = 250;

/// 已登录用户默认字符上限
pub const DEFAULT_USER_MAX_CHARS: usize = 2000;

/// 分级字符上限
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierLimits {
    pub guest_max_chars: usize,
    pub user_max_chars: usize,
}

impl Default for TierLimits {
    fn default() -> Self {
        Self {
            guest_max_chars: DEFAULT_GUEST_MAX_CHARS,
            user_max_chars: DEFAULT_USER_MAX_CHARS,
        }
    }
}

impl TierLimits {
    pub fn limit_for(&self, user: Option<&AuthenticatedUser>) -> usize {
        if user.is_some() {
            self.user_max_chars
        } else {
            self.guest_max_chars
        }
    }
}

/// 摘要命令
#[derive(Debug, Clone)]
pub struct SummarizeText {
    pub text: String,
    pub user: Option<AuthenticatedUser>,
}

/// 翻译命令
#[derive(Debug, Clone)]
pub struct TranslateText {
    pub text: String,
    /// 未指定时使用 French
    pub target_lang: Option<String>,
    pub user: Option<AuthenticatedUser>,
}
