//! History Context - Entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::dispatch::Operation;

/// 历史条目
///
/// 不变量:
/// - Summarize 条目只有 summary_text，translated_text 为空
/// - Translate 条目只有 translated_text 和 target_lang，summary_text 为空
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub user_id: i64,
    pub action_type: Operation,
    pub original_text: String,
    pub summary_text: Option<String>,
    pub translated_text: Option<String>,
    pub target_lang: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl HistoryEntry {
    /// 摘要历史
    pub fn summary(user_id: i64, original_text: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            action_type: Operation::Summarize,
            original_text: original_text.into(),
            summary_text: Some(summary.into()),
            translated_text: Some(String::new()),
            target_lang: None,
            created_at: Utc::now(),
        }
    }

    /// 翻译历史
    pub fn translation(
        user_id: i64,
        original_text: impl Into<String>,
        translation: impl Into<String>,
        target_lang: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            action_type: Operation::Translate,
            original_text: original_text.into(),
            summary_text: Some(String::new()),
            translated_text: Some(translation.into()),
            target_lang: Some(target_lang.into()),
            created_at: Utc::now(),
        }
    }
}
