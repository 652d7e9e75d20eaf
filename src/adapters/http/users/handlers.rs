//! HTTP handlers for user endpoints.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::users::{
    ListUsersError, ListUsersHandler, ListUsersQuery, UpdateProfileCommand, UpdateProfileError,
    UpdateProfileHandler,
};
use crate::domain::learner::LearnerProfile;

use super::dto::{UpdateProfileRequest, UserAccountResponse, UserProfileResponse};

#[derive(Clone)]
pub struct UsersAppState {
    pub list_users: Arc<ListUsersHandler>,
    pub update_profile: Arc<UpdateProfileHandler>,
}

/// GET /users - Directory listing, newest first (MANAGER and AUTHOR only)
pub async fn list_users(
    State(state): State<UsersAppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<Vec<UserAccountResponse>>, ApiError> {
    let accounts = state
        .list_users
        .handle(ListUsersQuery { requester: user })
        .await?;

    Ok(Json(accounts.into_iter().map(Into::into).collect()))
}

/// PUT /users/profile - Edit the caller's own directory profile
///
/// Content personalization keeps following token claims until the caller
/// obtains a new token.
pub async fn update_profile(
    State(state): State<UsersAppState>,
    RequireAuth(user): RequireAuth,
    body: Result<Json<UpdateProfileRequest>, JsonRejection>,
) -> Result<Json<UserAccountResponse>, ApiError> {
    let Json(req) = body?;

    let cmd = UpdateProfileCommand {
        user_id: user.id,
        name: req.name,
        department: req.department,
        language: req.copilot_language,
        level: req.ai_knowledge_level,
    };

    let account = state.update_profile.handle(cmd).await?;
    Ok(Json(account.into()))
}

/// GET /users/profile - The caller's resolved targeting profile
pub async fn get_profile(
    RequireAuth(user): RequireAuth,
) -> Result<Json<UserProfileResponse>, ApiError> {
    let profile = LearnerProfile::from_user(&user)?;
    Ok(Json(UserProfileResponse::new(&user, &profile)))
}

impl From<ListUsersError> for ApiError {
    fn from(err: ListUsersError) -> Self {
        match err {
            ListUsersError::Forbidden => ApiError::Forbidden(err.to_string()),
            ListUsersError::Infrastructure(msg) => ApiError::Internal(msg),
        }
    }
}

impl From<UpdateProfileError> for ApiError {
    fn from(err: UpdateProfileError) -> Self {
        match err {
            UpdateProfileError::Validation(e) => e.into(),
            UpdateProfileError::UserNotFound(id) => ApiError::not_found("User", id),
            UpdateProfileError::Infrastructure(msg) => ApiError::Internal(msg),
        }
    }
}
