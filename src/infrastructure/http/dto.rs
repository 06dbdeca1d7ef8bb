//! Data Transfer Objects

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::{SummarizeResponse, SystemConfigResponse, TranslateResponse};
use crate::domain::history::HistoryEntry;

// ============================================================================
// 统一响应结构
// ============================================================================

/// 统一 API 响应格式
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub errno: i32,
    pub error: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 成功响应
    pub fn success(data: T) -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(data),
        }
    }
}

// ============================================================================
// Tool DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SummarizeRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct SummarizeResponseDto {
    pub summary: String,
}

impl From<SummarizeResponse> for SummarizeResponseDto {
    fn from(r: SummarizeResponse) -> Self {
        Self { summary: r.summary }
    }
}

#[derive(Debug, Deserialize)]
pub struct TranslateRequest {
    pub text: String,
    /// 缺省为 French
    #[serde(default)]
    pub target_lang: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TranslateResponseDto {
    pub translation: String,
    pub target_lang: String,
}

impl From<TranslateResponse> for TranslateResponseDto {
    fn from(r: TranslateResponse) -> Self {
        Self {
            translation: r.translation,
            target_lang: r.target_lang,
        }
    }
}

// ============================================================================
// History DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct HistoryItemDto {
    pub id: Uuid,
    pub action_type: String,
    pub original_text: String,
    pub summary_text: Option<String>,
    pub translated_text: Option<String>,
    pub target_lang: Option<String>,
    pub created_at: String,
}

impl From<HistoryEntry> for HistoryItemDto {
    fn from(e: HistoryEntry) -> Self {
        Self {
            id: e.id,
            action_type: e.action_type.as_str().to_string(),
            original_text: e.original_text,
            summary_text: e.summary_text,
            translated_text: e.translated_text,
            target_lang: e.target_lang,
            created_at: e.created_at.to_rfc3339(),
        }
    }
}

// ============================================================================
// Admin DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct UpdateConfigRequest {
    pub value: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// 不回传 value
#[derive(Debug, Serialize)]
pub struct SystemConfigDto {
    pub key: String,
    pub description: Option<String>,
    pub updated_at: String,
}

impl From<SystemConfigResponse> for SystemConfigDto {
    fn from(r: SystemConfigResponse) -> Self {
        Self {
            key: r.key,
            description: r.description,
            updated_at: r.updated_at.to_rfc3339(),
        }
    }
}
