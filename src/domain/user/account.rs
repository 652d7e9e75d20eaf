//! Directory account of one user.

use crate::domain::foundation::{Timestamp, UserId, ValidationError};
use crate::domain::learner::KnowledgeLevel;

/// A registered user as kept in the user directory.
///
/// Role and email are managed by the identity provider; the remaining
/// attributes can be edited by the user through [`ProfileChanges`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    pub id: UserId,
    pub email: String,
    pub name: Option<String>,
    pub role: String,
    pub department: Option<String>,
    /// Preferred Copilot language.
    pub language: Option<String>,
    /// Self-assessed AI knowledge level.
    pub level: KnowledgeLevel,
    pub created_at: Timestamp,
}

impl UserAccount {
    pub fn new(id: UserId, email: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
            name: None,
            role: role.into(),
            department: None,
            language: None,
            level: KnowledgeLevel::BEGINNER,
            created_at: Timestamp::now(),
        }
    }
}

/// Self-service edit of a user's profile. Absent fields are left as they
/// are; a blank string clears the field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileChanges {
    pub name: Option<String>,
    pub department: Option<String>,
    pub language: Option<String>,
    pub level: Option<KnowledgeLevel>,
}

impl ProfileChanges {
    /// Builds a change set, validating the raw level.
    pub fn new(
        name: Option<String>,
        department: Option<String>,
        language: Option<String>,
        level: Option<u32>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            name,
            department,
            language,
            level: level.map(KnowledgeLevel::new).transpose()?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.department.is_none()
            && self.language.is_none()
            && self.level.is_none()
    }

    pub fn apply(&self, account: &mut UserAccount) {
        if let Some(name) = &self.name {
            account.name = non_blank(name);
        }
        if let Some(department) = &self.department {
            account.department = non_blank(department);
        }
        if let Some(language) = &self.language {
            account.language = non_blank(language);
        }
        if let Some(level) = self.level {
            account.level = level;
        }
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
