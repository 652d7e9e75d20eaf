//! HTTP routes for authoring endpoints.

use axum::{routing::put, Router};

use super::handlers::{upsert_default_content, upsert_variant, AuthoringAppState};

/// Creates the authoring router. Mounted under `/api/v1/authoring`.
pub fn authoring_routes() -> Router<AuthoringAppState> {
    Router::new()
        .route("/units/:unit_id/default", put(upsert_default_content))
        .route("/units/:unit_id/variants", put(upsert_variant))
}
