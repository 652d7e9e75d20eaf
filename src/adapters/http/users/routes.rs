//! HTTP routes for user endpoints.

use axum::{routing::get, Router};

use super::handlers::{get_profile, list_users, update_profile, UsersAppState};

/// Creates the users router. Mounted under `/api/v1/users`.
pub fn users_routes() -> Router<UsersAppState> {
    Router::new()
        .route("/", get(list_users))
        .route("/profile", get(get_profile).put(update_profile))
}
