//! UpdateProgressHandler - Command handler upserting a learner's progress
//! on one step.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, Percentage, StepId, UserId, ValidationError};
use crate::domain::progress::{validate_last_screen, ProgressStatus, ProgressUpdate, UserProgress};
use crate::ports::{CatalogReader, ProgressRepository};

/// Command to record progress. Absent fields take their defaults.
#[derive(Debug, Clone)]
pub struct UpdateProgressCommand {
    pub user_id: UserId,
    pub step_id: StepId,
    pub status: Option<ProgressStatus>,
    pub progress_percent: Option<u32>,
    pub last_screen: Option<u32>,
}

pub type UpdateProgressResult = UserProgress;

#[derive(Debug, Clone, thiserror::Error)]
pub enum UpdateProgressError {
    #[error("Invalid progress: {0}")]
    Validation(#[from] ValidationError),

    #[error("Step not found: {0}")]
    StepNotFound(StepId),

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

impl From<DomainError> for UpdateProgressError {
    fn from(err: DomainError) -> Self {
        UpdateProgressError::Infrastructure(err.message)
    }
}

pub struct UpdateProgressHandler {
    catalog: Arc<dyn CatalogReader>,
    repository: Arc<dyn ProgressRepository>,
}

impl UpdateProgressHandler {
    pub fn new(catalog: Arc<dyn CatalogReader>, repository: Arc<dyn ProgressRepository>) -> Self {
        Self {
            catalog,
            repository,
        }
    }

    pub async fn handle(
        &self,
        cmd: UpdateProgressCommand,
    ) -> Result<UpdateProgressResult, UpdateProgressError> {
        let update = ProgressUpdate {
            status: cmd.status,
            progress_percent: cmd.progress_percent.map(Percentage::try_new).transpose()?,
            last_screen: cmd.last_screen.map(validate_last_screen).transpose()?,
        };

        if !self.catalog.step_exists(&cmd.step_id).await? {
            return Err(UpdateProgressError::StepNotFound(cmd.step_id));
        }

        let progress = match self.repository.find(&cmd.user_id, &cmd.step_id).await? {
            Some(mut existing) => {
                existing.apply(&update);
                existing
            }
            None => UserProgress::create(cmd.user_id, cmd.step_id, &update),
        };

        self.repository.save(&progress).await?;

        tracing::info!(
            user_id = %progress.user_id,
            step_id = %progress.step_id,
            status = %progress.status,
            percent = progress.progress_percent.value(),
            "Progress updated"
        );

        Ok(progress)
    }
}
