//! Completion percentage for step progress.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Completion of a step, clamped to the 0..=100 range at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Percentage(u8);

impl Percentage {
    pub const ZERO: Self = Self(0);
    pub const HUNDRED: Self = Self(100);

    /// Accepts any integer source (request bodies carry `u32`, storage
    /// carries `i16`); values outside 0..=100 are rejected, not clamped.
    pub fn try_new(value: impl Into<i64>) -> Result<Self, ValidationError> {
        let value = value.into();
        match u8::try_from(value) {
            Ok(v) if v <= 100 => Ok(Self(v)),
            _ => Err(ValidationError::out_of_range("progress_percent", 0, 100, value)),
        }
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    pub fn is_complete(&self) -> bool {
        self.0 == 100
    }
}

impl Default for Percentage {
    fn default() -> Self {
        Self::ZERO
    }
}

impl TryFrom<i64> for Percentage {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<Percentage> for u8 {
    fn from(p: Percentage) -> Self {
        p.0
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}
