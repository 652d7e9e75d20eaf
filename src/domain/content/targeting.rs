//! Audience targeting predicates.
//!
//! A variant's targeting is a data-driven list of `(axis, value)`
//! predicates rather than one hardcoded field per axis, so the scorer and
//! resolver work the same way for every content model.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Highest knowledge level a learner may hold or a variant may target.
/// Levels are stored as signed 32-bit integers.
pub const MAX_LEVEL: u32 = i32::MAX as u32;

/// An attribute of the learner that a variant may target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetAxis {
    Role,
    Level,
    Language,
    Department,
}

impl TargetAxis {
    /// Every axis, in canonical order.
    pub const ALL: &'static [TargetAxis] = &[
        TargetAxis::Role,
        TargetAxis::Level,
        TargetAxis::Language,
        TargetAxis::Department,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TargetAxis::Role => "role",
            TargetAxis::Level => "level",
            TargetAxis::Language => "language",
            TargetAxis::Department => "department",
        }
    }
}

impl fmt::Display for TargetAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The value a predicate compares against.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AxisValue {
    Text(String),
    Level(u32),
}

impl fmt::Display for AxisValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AxisValue::Text(s) => write!(f, "{}", s),
            AxisValue::Level(l) => write!(f, "{}", l),
        }
    }
}

/// Anything that exposes values for targeting axes (normally a learner profile).
pub trait TargetingSubject {
    /// Returns the subject's value on `axis`, or `None` when it has none.
    fn axis_value(&self, axis: TargetAxis) -> Option<AxisValue>;
}

/// One declared `(axis, value)` predicate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AxisPredicate {
    pub axis: TargetAxis,
    pub value: AxisValue,
}

/// The set of predicates a variant declares. Undeclared axes are wildcards.
///
/// Holds at most one predicate per axis, kept in canonical axis order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "TargetingFields", into = "TargetingFields")]
pub struct Targeting {
    predicates: Vec<AxisPredicate>,
}

impl Targeting {
    /// Targeting with no predicates (matches everyone).
    pub fn any() -> Self {
        Self::default()
    }

    /// Adds or replaces the predicate on `axis`.
    pub fn with(mut self, axis: TargetAxis, value: AxisValue) -> Self {
        self.predicates.retain(|p| p.axis != axis);
        self.predicates.push(AxisPredicate { axis, value });
        self.predicates.sort_by_key(|p| p.axis);
        self
    }

    pub fn with_role(self, role: impl Into<String>) -> Self {
        self.with(TargetAxis::Role, AxisValue::Text(role.into()))
    }

    pub fn with_level(self, level: u32) -> Self {
        self.with(TargetAxis::Level, AxisValue::Level(level))
    }

    pub fn with_language(self, language: impl Into<String>) -> Self {
        self.with(TargetAxis::Language, AxisValue::Text(language.into()))
    }

    pub fn with_department(self, department: impl Into<String>) -> Self {
        self.with(TargetAxis::Department, AxisValue::Text(department.into()))
    }

    /// Builds targeting from nullable storage columns.
    ///
    /// Empty strings and a zero level count as absent, mirroring how
    /// authored records leave an axis untargeted.
    pub fn from_columns(
        role: Option<String>,
        level: Option<u32>,
        language: Option<String>,
        department: Option<String>,
    ) -> Self {
        let mut targeting = Self::any();
        if let Some(role) = role.filter(|s| !s.is_empty()) {
            targeting = targeting.with_role(role);
        }
        if let Some(level) = level.filter(|l| *l > 0) {
            targeting = targeting.with_level(level);
        }
        if let Some(language) = language.filter(|s| !s.is_empty()) {
            targeting = targeting.with_language(language);
        }
        if let Some(department) = department.filter(|s| !s.is_empty()) {
            targeting = targeting.with_department(department);
        }
        targeting
    }

    pub fn predicates(&self) -> &[AxisPredicate] {
        &self.predicates
    }

    /// Number of declared (non-wildcard) axes.
    pub fn declared_count(&self) -> usize {
        self.predicates.len()
    }

    /// True when no axis is declared.
    pub fn is_default(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Returns the declared value for `axis`, if any.
    pub fn value_for(&self, axis: TargetAxis) -> Option<&AxisValue> {
        self.predicates
            .iter()
            .find(|p| p.axis == axis)
            .map(|p| &p.value)
    }

    /// Rejects predicate values that cannot be stored faithfully.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.value_for(TargetAxis::Level) {
            Some(AxisValue::Level(level)) if *level > MAX_LEVEL => Err(
                ValidationError::out_of_range("targetLevel", 1, i64::from(MAX_LEVEL), i64::from(*level)),
            ),
            _ => Ok(()),
        }
    }

    fn text_for(&self, axis: TargetAxis) -> Option<String> {
        self.value_for(axis).map(|v| v.to_string())
    }
}

/// Wire/storage shape of [`Targeting`]: one optional field per axis.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetingFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_level: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_department: Option<String>,
}

impl From<TargetingFields> for Targeting {
    fn from(fields: TargetingFields) -> Self {
        Targeting::from_columns(
            fields.target_role,
            fields.target_level,
            fields.target_language,
            fields.target_department,
        )
    }
}

impl From<Targeting> for TargetingFields {
    fn from(targeting: Targeting) -> Self {
        let target_level = match targeting.value_for(TargetAxis::Level) {
            Some(AxisValue::Level(level)) => Some(*level),
            _ => None,
        };
        TargetingFields {
            target_role: targeting.text_for(TargetAxis::Role),
            target_level,
            target_language: targeting.text_for(TargetAxis::Language),
            target_department: targeting.text_for(TargetAxis::Department),
        }
    }
}
