//! Learner targeting profile.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

use crate::domain::content::{AxisValue, TargetAxis, TargetingSubject, MAX_LEVEL};
use crate::domain::foundation::{AuthenticatedUser, ValidationError};

/// Role string used for targeting (`LEARNER`, `MANAGER`, `AUTHOR`, or a
/// department-as-role such as `IT`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(String);

impl Role {
    pub fn new(role: impl Into<String>) -> Result<Self, ValidationError> {
        let role = role.into();
        if role.trim().is_empty() {
            return Err(ValidationError::empty_field("role"));
        }
        Ok(Self(role))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Knowledge/proficiency tier, starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KnowledgeLevel(u32);

impl KnowledgeLevel {
    /// Level assumed when a token carries no level claim.
    pub const BEGINNER: Self = Self(1);

    pub fn new(level: u32) -> Result<Self, ValidationError> {
        if level == 0 || level > MAX_LEVEL {
            return Err(ValidationError::out_of_range(
                "level",
                1,
                i64::from(MAX_LEVEL),
                i64::from(level),
            ));
        }
        Ok(Self(level))
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl Default for KnowledgeLevel {
    fn default() -> Self {
        Self::BEGINNER
    }
}

/// Attributes of the requesting learner used to match content variants.
///
/// Built fresh for every request from the authenticated user's claims and
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearnerProfile {
    pub role: Role,
    pub level: KnowledgeLevel,
    /// Absent language never matches a language-targeted variant.
    pub language: Option<String>,
    pub department: Option<String>,
}

impl LearnerProfile {
    pub fn new(role: Role, level: KnowledgeLevel) -> Self {
        Self {
            role,
            level,
            language: None,
            department: None,
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = non_blank(Some(language.into()));
        self
    }

    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = non_blank(Some(department.into()));
        self
    }

    /// Normalizes the claims of an authenticated user.
    ///
    /// A missing level defaults to [`KnowledgeLevel::BEGINNER`]; blank
    /// language or department claims are treated as absent.
    pub fn from_user(user: &AuthenticatedUser) -> Result<Self, ValidationError> {
        let level = match user.level {
            Some(level) => KnowledgeLevel::new(level)?,
            None => KnowledgeLevel::default(),
        };

        Ok(Self {
            role: Role::new(user.role.clone())?,
            level,
            language: non_blank(user.language.clone()),
            department: non_blank(user.department.clone()),
        })
    }

    /// Stable hash of every targeting axis value.
    ///
    /// Two profiles with the same fingerprint resolve every content unit
    /// identically, so it is safe to key memoized step payloads on it.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        for axis in TargetAxis::ALL {
            hasher.update(axis.as_str().as_bytes());
            hasher.update(b"=");
            if let Some(value) = self.axis_value(*axis) {
                hasher.update(value.to_string().as_bytes());
            }
            hasher.update(b";");
        }
        format!("{:x}", hasher.finalize())
    }
}

impl TargetingSubject for LearnerProfile {
    fn axis_value(&self, axis: TargetAxis) -> Option<AxisValue> {
        match axis {
            TargetAxis::Role => Some(AxisValue::Text(self.role.as_str().to_string())),
            TargetAxis::Level => Some(AxisValue::Level(self.level.value())),
            TargetAxis::Language => self.language.clone().map(AxisValue::Text),
            TargetAxis::Department => self.department.clone().map(AxisValue::Text),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;

    fn user() -> AuthenticatedUser {
        AuthenticatedUser::new(UserId::new("user_john").unwrap(), "john@company.com", "IT")
    }

    #[test]
    fn role_rejects_blank() {
        assert!(Role::new(" ").is_err());
    }

    #[test]
    fn knowledge_level_rejects_zero_and_overflow() {
        assert!(KnowledgeLevel::new(0).is_err());
        assert!(KnowledgeLevel::new(MAX_LEVEL + 1).is_err());
        assert_eq!(KnowledgeLevel::new(3).unwrap().value(), 3);
    }

    #[test]
    fn from_user_defaults_level_to_beginner() {
        let profile = LearnerProfile::from_user(&user()).unwrap();
        assert_eq!(profile.level, KnowledgeLevel::BEGINNER);
        assert_eq!(profile.role.as_str(), "IT");
    }

    #[test]
    fn from_user_copies_targeting_claims() {
        let user = user().with_language("english").with_department("IT").with_level(2);
        let profile = LearnerProfile::from_user(&user).unwrap();

        assert_eq!(profile.language.as_deref(), Some("english"));
        assert_eq!(profile.department.as_deref(), Some("IT"));
        assert_eq!(profile.level.value(), 2);
    }

    #[test]
    fn from_user_treats_blank_claims_as_absent() {
        let user = user().with_language("").with_department("  ");
        let profile = LearnerProfile::from_user(&user).unwrap();

        assert!(profile.language.is_none());
        assert!(profile.department.is_none());
    }

    #[test]
    fn from_user_rejects_level_zero() {
        assert!(LearnerProfile::from_user(&user().with_level(0)).is_err());
    }

    #[test]
    fn axis_values_follow_profile_fields() {
        let profile = LearnerProfile::new(Role::new("IT").unwrap(), KnowledgeLevel::BEGINNER)
            .with_language("hebrew");

        assert_eq!(
            profile.axis_value(TargetAxis::Role),
            Some(AxisValue::Text("IT".to_string()))
        );
        assert_eq!(profile.axis_value(TargetAxis::Level), Some(AxisValue::Level(1)));
        assert_eq!(
            profile.axis_value(TargetAxis::Language),
            Some(AxisValue::Text("hebrew".to_string()))
        );
        assert_eq!(profile.axis_value(TargetAxis::Department), None);
    }

    #[test]
    fn fingerprint_is_stable_and_distinguishes_profiles() {
        let a = LearnerProfile::new(Role::new("IT").unwrap(), KnowledgeLevel::BEGINNER);
        let b = a.clone();
        let c = a.clone().with_language("english");

        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_ne!(a.fingerprint(), c.fingerprint());
        assert_eq!(a.fingerprint().len(), 64);
    }
}
