//! Authentication middleware and extractor for axum.
//!
//! ```text
//! Request → auth_middleware → injects AuthenticatedUser into extensions
//!                                      ↓
//!                              Handler → RequireAuth extractor reads from extensions
//! ```
//!
//! The middleware only depends on the `SessionValidator` port, so the JWT
//! validator and the test mock plug in the same way.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::ErrorResponse;
use crate::domain::foundation::{AuthError, AuthenticatedUser};
use crate::ports::SessionValidator;

/// Auth middleware state - wraps the session validator.
pub type AuthState = Arc<dyn SessionValidator>;

/// Validates the `Authorization: Bearer <token>` header.
///
/// On success the `AuthenticatedUser` is stored in the request extensions.
/// A request without a bearer token passes through untouched; handlers
/// that need a caller use [`RequireAuth`]. A token that fails validation
/// is rejected here with 401.
pub async fn auth_middleware(
    State(validator): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty());

    let Some(token) = token else {
        return next.run(request).await;
    };

    match validator.validate(token).await {
        Ok(user) => {
            tracing::debug!(user_id = %user.id, role = %user.role, "Authenticated request");
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(e) => {
            let (status, message) = match &e {
                AuthError::TokenExpired => (StatusCode::UNAUTHORIZED, "Token expired"),
                AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid token"),
                AuthError::InsufficientPermissions => {
                    (StatusCode::FORBIDDEN, "Insufficient permissions")
                }
                AuthError::ServiceUnavailable(msg) => {
                    tracing::error!("Auth service unavailable: {}", msg);
                    (
                        StatusCode::SERVICE_UNAVAILABLE,
                        "Authentication service unavailable",
                    )
                }
            };

            (status, Json(ErrorResponse::new("AUTH_ERROR", message))).into_response()
        }
    }
}

/// Extractor that requires an authenticated caller.
///
/// ```ignore
/// async fn my_handler(RequireAuth(user): RequireAuth) -> impl IntoResponse {
///     format!("Hello, {}!", user.email)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequireAuth(pub AuthenticatedUser);

#[async_trait]
impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .map(RequireAuth)
            .ok_or(AuthRejection::Unauthenticated)
    }
}

#[derive(Debug, Clone)]
pub enum AuthRejection {
    /// No valid bearer token was provided.
    Unauthenticated,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            AuthRejection::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse::unauthorized("Authentication required")),
            )
                .into_response(),
        }
    }
}
