//! HTTP adapters - REST API implementations.
//!
//! Each area has its own router and state; [`api_router`] mounts them under
//! `/api/v1` behind the bearer token middleware and adds `/health`.

pub mod authoring;
pub mod content;
pub mod error;
pub mod health;
pub mod middleware;
pub mod users;

use axum::Router;

pub use authoring::{authoring_routes, AuthoringAppState};
pub use content::{content_routes, ContentAppState};
pub use error::{ApiError, ErrorResponse};
pub use health::health_routes;
pub use middleware::{auth_middleware, AuthState, RequireAuth};
pub use users::{users_routes, UsersAppState};

/// Everything the HTTP layer needs to serve requests.
#[derive(Clone)]
pub struct ApiState {
    pub content: ContentAppState,
    pub authoring: AuthoringAppState,
    pub users: UsersAppState,
    pub auth: AuthState,
}

/// Builds the full application router (without server-level layers).
pub fn api_router(state: ApiState) -> Router {
    let api = Router::new()
        .nest("/content", content_routes().with_state(state.content))
        .nest("/authoring", authoring_routes().with_state(state.authoring))
        .nest("/users", users_routes().with_state(state.users))
        .layer(axum::middleware::from_fn_with_state(
            state.auth,
            auth_middleware,
        ));

    Router::new().nest("/api/v1", api).merge(health_routes())
}
