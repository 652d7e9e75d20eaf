//! HTTP handlers for content endpoints.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::catalog::{
    GetModuleError, GetModuleHandler, GetModuleQuery, ListModulesError, ListModulesHandler,
    ListModulesQuery,
};
use crate::application::handlers::content::{
    GetStepContentError, GetStepContentHandler, GetStepContentQuery,
};
use crate::application::handlers::progress::{
    ListProgressError, ListProgressHandler, ListProgressQuery, UpdateProgressCommand,
    UpdateProgressError, UpdateProgressHandler,
};
use crate::domain::catalog::LearningModule;
use crate::domain::content::StepPayload;
use crate::domain::foundation::{ModuleId, StepId};
use crate::domain::learner::LearnerProfile;
use crate::domain::progress::ProgressStatus;

use super::dto::{ProgressResponse, UpdateProgressRequest};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct ContentAppState {
    pub get_step_content: Arc<GetStepContentHandler>,
    pub list_modules: Arc<ListModulesHandler>,
    pub get_module: Arc<GetModuleHandler>,
    pub update_progress: Arc<UpdateProgressHandler>,
    pub list_progress: Arc<ListProgressHandler>,
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /content/steps/:step_id - Step content for the caller's profile
pub async fn get_step_content(
    State(state): State<ContentAppState>,
    RequireAuth(user): RequireAuth,
    Path(step_id): Path<String>,
) -> Result<Json<StepPayload>, ApiError> {
    let query = GetStepContentQuery {
        step_id: StepId::new(step_id)?,
        profile: LearnerProfile::from_user(&user)?,
    };

    let payload = state.get_step_content.handle(query).await?;
    Ok(Json(payload))
}

/// GET /content/modules - Module catalog
pub async fn list_modules(
    State(state): State<ContentAppState>,
    RequireAuth(_user): RequireAuth,
) -> Result<Json<Vec<LearningModule>>, ApiError> {
    let modules = state.list_modules.handle(ListModulesQuery).await?;
    Ok(Json(modules))
}

/// GET /content/modules/:module_id - One module
pub async fn get_module(
    State(state): State<ContentAppState>,
    RequireAuth(_user): RequireAuth,
    Path(module_id): Path<String>,
) -> Result<Json<LearningModule>, ApiError> {
    let query = GetModuleQuery {
        module_id: ModuleId::new(module_id)?,
    };

    let module = state.get_module.handle(query).await?;
    Ok(Json(module))
}

/// GET /content/progress - Caller's progress on every step
pub async fn list_progress(
    State(state): State<ContentAppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<Vec<ProgressResponse>>, ApiError> {
    let query = ListProgressQuery { user_id: user.id };

    let records = state.list_progress.handle(query).await?;
    Ok(Json(records.into_iter().map(ProgressResponse::from).collect()))
}

/// POST /content/progress - Record progress on a step
pub async fn update_progress(
    State(state): State<ContentAppState>,
    RequireAuth(user): RequireAuth,
    body: Result<Json<UpdateProgressRequest>, JsonRejection>,
) -> Result<Json<ProgressResponse>, ApiError> {
    let Json(req) = body?;

    let status = req
        .status
        .as_deref()
        .map(str::parse::<ProgressStatus>)
        .transpose()?;

    let cmd = UpdateProgressCommand {
        user_id: user.id,
        step_id: StepId::new(req.step_id)?,
        status,
        progress_percent: req.progress_percent,
        last_screen: req.last_screen,
    };

    let progress = state.update_progress.handle(cmd).await?;
    Ok(Json(progress.into()))
}

// ════════════════════════════════════════════════════════════════════════════
// Error mapping
// ════════════════════════════════════════════════════════════════════════════

impl From<GetStepContentError> for ApiError {
    fn from(err: GetStepContentError) -> Self {
        match err {
            GetStepContentError::StepNotFound(id) => ApiError::not_found("Step", id),
            GetStepContentError::UnitNotFound(id) => ApiError::not_found("Content unit", id),
            GetStepContentError::Infrastructure(msg) => ApiError::Internal(msg),
        }
    }
}

impl From<ListModulesError> for ApiError {
    fn from(err: ListModulesError) -> Self {
        match err {
            ListModulesError::Infrastructure(msg) => ApiError::Internal(msg),
        }
    }
}

impl From<GetModuleError> for ApiError {
    fn from(err: GetModuleError) -> Self {
        match err {
            GetModuleError::NotFound(id) => ApiError::not_found("Module", id),
            GetModuleError::Infrastructure(msg) => ApiError::Internal(msg),
        }
    }
}

impl From<UpdateProgressError> for ApiError {
    fn from(err: UpdateProgressError) -> Self {
        match err {
            UpdateProgressError::Validation(e) => e.into(),
            UpdateProgressError::StepNotFound(id) => ApiError::not_found("Step", id),
            UpdateProgressError::Infrastructure(msg) => ApiError::Internal(msg),
        }
    }
}

impl From<ListProgressError> for ApiError {
    fn from(err: ListProgressError) -> Self {
        match err {
            ListProgressError::Infrastructure(msg) => ApiError::Internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{UnitId, ValidationError};
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    #[test]
    fn unknown_step_maps_to_404() {
        let err: ApiError = GetStepContentError::StepNotFound(StepId::new("word_x").unwrap()).into();
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn unknown_unit_maps_to_404() {
        let err: ApiError = GetStepContentError::UnitNotFound(UnitId::new("u1").unwrap()).into();
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn store_outage_maps_to_500() {
        let err: ApiError = GetStepContentError::Infrastructure("timeout".into()).into();
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn invalid_progress_maps_to_400() {
        let err: ApiError =
            UpdateProgressError::Validation(ValidationError::empty_field("stepId")).into();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
