//! HTTP routes for content endpoints.

use axum::{routing::get, Router};

use super::handlers::{
    get_module, get_step_content, list_modules, list_progress, update_progress, ContentAppState,
};

/// Creates the content router. Mounted under `/api/v1/content`.
pub fn content_routes() -> Router<ContentAppState> {
    Router::new()
        .route("/steps/:step_id", get(get_step_content))
        .route("/modules", get(list_modules))
        .route("/modules/:module_id", get(get_module))
        .route("/progress", get(list_progress).post(update_progress))
}
