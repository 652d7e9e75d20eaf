//! Strongly-typed identifier value objects.
//!
//! Authored content is keyed by human-readable slugs (`word_s1`,
//! `01-word`), so every identifier wraps a non-empty string.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

/// Declares a non-empty string identifier with the usual conversions.
macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, returning error if empty.
            pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
                let id = id.into();
                if id.trim().is_empty() {
                    return Err(ValidationError::empty_field($field));
                }
                Ok(Self(id))
            }

            /// Returns the inner string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

string_id!(
    /// Unique identifier for a learner, manager or author.
    UserId,
    "user_id"
);

string_id!(
    /// Unique identifier for a learning module (e.g. `01-word`).
    ModuleId,
    "module_id"
);

string_id!(
    /// Unique identifier for a step within a module (e.g. `word_s1`).
    StepId,
    "step_id"
);

string_id!(
    /// Unique identifier for a screen within a step.
    ScreenId,
    "screen_id"
);

string_id!(
    /// Unique identifier for a content unit (a component or a screen part).
    UnitId,
    "unit_id"
);

string_id!(
    /// Unique identifier for a targeted variant of a content unit.
    VariantId,
    "variant_id"
);

impl VariantId {
    /// Creates a fresh random VariantId for newly authored variants.
    pub fn generate() -> Self {
        Self(format!("var_{}", Uuid::new_v4().simple()))
    }
}

impl ScreenId {
    /// Screen id used for the single synthetic screen of VIDEO and HANDSON steps.
    pub fn synthetic(step_id: &StepId) -> Self {
        Self(format!("{}#screen-1", step_id))
    }
}
