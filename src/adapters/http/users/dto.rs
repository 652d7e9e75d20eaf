//! HTTP DTOs for user endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::AuthenticatedUser;
use crate::domain::learner::LearnerProfile;
use crate::domain::user::UserAccount;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Self-service profile edit. Omitted fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default, alias = "language")]
    pub copilot_language: Option<String>,
    #[serde(default, alias = "level")]
    pub ai_knowledge_level: Option<u32>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// The caller as content resolution sees them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileResponse {
    pub user_id: String,
    pub email: String,
    pub role: String,
    pub level: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    /// Changes whenever any targeting value changes.
    pub profile_fingerprint: String,
}

impl UserProfileResponse {
    pub fn new(user: &AuthenticatedUser, profile: &LearnerProfile) -> Self {
        Self {
            user_id: user.id.to_string(),
            email: user.email.clone(),
            role: profile.role.to_string(),
            level: profile.level.value(),
            language: profile.language.clone(),
            department: profile.department.clone(),
            profile_fingerprint: profile.fingerprint(),
        }
    }
}

/// A directory account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccountResponse {
    pub user_id: String,
    pub email: String,
    pub name: Option<String>,
    pub role: String,
    pub department: Option<String>,
    pub copilot_language: Option<String>,
    pub ai_knowledge_level: u32,
    pub created_at: String,
}

impl From<UserAccount> for UserAccountResponse {
    fn from(account: UserAccount) -> Self {
        Self {
            user_id: account.id.to_string(),
            email: account.email,
            name: account.name,
            role: account.role,
            department: account.department,
            copilot_language: account.language,
            ai_knowledge_level: account.level.value(),
            created_at: account.created_at.to_rfc3339(),
        }
    }
}
