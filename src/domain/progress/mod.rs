//! Progress module - per-learner, per-step progress records.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{Percentage, StepId, Timestamp, UserId, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProgressStatus {
    NotStarted,
    InProgress,
    Completed,
}

impl ProgressStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProgressStatus::NotStarted => "NOT_STARTED",
            ProgressStatus::InProgress => "IN_PROGRESS",
            ProgressStatus::Completed => "COMPLETED",
        }
    }
}

impl fmt::Display for ProgressStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProgressStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NOT_STARTED" => Ok(ProgressStatus::NotStarted),
            "IN_PROGRESS" => Ok(ProgressStatus::InProgress),
            "COMPLETED" => Ok(ProgressStatus::Completed),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("unknown progress status '{}'", other),
            )),
        }
    }
}

/// Requested change to one progress record. Absent fields fall back to
/// their defaults when applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressUpdate {
    pub status: Option<ProgressStatus>,
    pub progress_percent: Option<Percentage>,
    pub last_screen: Option<u32>,
}

/// Progress of one learner on one step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProgress {
    pub user_id: UserId,
    pub step_id: StepId,
    pub status: ProgressStatus,
    pub progress_percent: Percentage,
    pub last_screen: u32,
    pub updated_at: Timestamp,
}

impl UserProgress {
    pub const FIRST_SCREEN: u32 = 1;

    /// Builds a new record from an update. Status defaults to in-progress.
    pub fn create(user_id: UserId, step_id: StepId, update: &ProgressUpdate) -> Self {
        Self {
            user_id,
            step_id,
            status: update.status.unwrap_or(ProgressStatus::InProgress),
            progress_percent: update.progress_percent.unwrap_or(Percentage::ZERO),
            last_screen: update.last_screen.unwrap_or(Self::FIRST_SCREEN),
            updated_at: Timestamp::now(),
        }
    }

    /// Applies an update to an existing record.
    ///
    /// A missing status keeps the stored one; a missing percent or screen
    /// resets to zero and the first screen respectively.
    pub fn apply(&mut self, update: &ProgressUpdate) {
        if let Some(status) = update.status {
            self.status = status;
        }
        self.progress_percent = update.progress_percent.unwrap_or(Percentage::ZERO);
        self.last_screen = update.last_screen.unwrap_or(Self::FIRST_SCREEN);
        self.updated_at = Timestamp::now();
    }
}

/// Validates a requested last-screen value (screens count from 1).
pub fn validate_last_screen(screen: u32) -> Result<u32, ValidationError> {
    if screen == 0 {
        return Err(ValidationError::out_of_range(
            "last_screen",
            1,
            i64::from(u32::MAX),
            0,
        ));
    }
    Ok(screen)
}
