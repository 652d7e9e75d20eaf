//! HTTP DTOs for content endpoints.
//!
//! Step payloads and modules are already wire-shaped domain types and are
//! returned as-is; progress gets its own request and response shapes.

use serde::{Deserialize, Serialize};

use crate::domain::progress::UserProgress;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Body of `POST /progress`. Omitted fields fall back to their defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProgressRequest {
    pub step_id: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub progress_percent: Option<u32>,
    #[serde(default)]
    pub last_screen: Option<u32>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressResponse {
    pub user_id: String,
    pub step_id: String,
    pub status: String,
    pub progress_percent: u8,
    pub last_screen: u32,
    /// RFC 3339.
    pub updated_at: String,
}

impl From<UserProgress> for ProgressResponse {
    fn from(progress: UserProgress) -> Self {
        Self {
            user_id: progress.user_id.to_string(),
            step_id: progress.step_id.to_string(),
            status: progress.status.as_str().to_string(),
            progress_percent: progress.progress_percent.value(),
            last_screen: progress.last_screen,
            updated_at: progress.updated_at.to_rfc3339(),
        }
    }
}
