//! HTTP handlers for authoring endpoints.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::authoring::{
    UpsertDefaultContentCommand, UpsertDefaultContentError, UpsertDefaultContentHandler,
    UpsertVariantCommand, UpsertVariantError, UpsertVariantHandler,
};
use crate::domain::content::{ContentPayload, Targeting};
use crate::domain::foundation::UnitId;

use super::dto::{ContentUnitResponse, UpsertDefaultRequest, UpsertVariantRequest, VariantResponse};

#[derive(Clone)]
pub struct AuthoringAppState {
    pub upsert_default: Arc<UpsertDefaultContentHandler>,
    pub upsert_variant: Arc<UpsertVariantHandler>,
}

/// PUT /authoring/units/:unit_id/default
pub async fn upsert_default_content(
    State(state): State<AuthoringAppState>,
    RequireAuth(user): RequireAuth,
    Path(unit_id): Path<String>,
    body: Result<Json<UpsertDefaultRequest>, JsonRejection>,
) -> Result<Json<ContentUnitResponse>, ApiError> {
    let Json(req) = body?;

    let cmd = UpsertDefaultContentCommand {
        author: user,
        unit_id: UnitId::new(unit_id)?,
        content: ContentPayload::from_value(req.content)?,
    };

    let unit = state.upsert_default.handle(cmd).await?;
    Ok(Json(unit.into()))
}

/// PUT /authoring/units/:unit_id/variants
///
/// Responds 201 when a variant was created and 200 when one was replaced.
pub async fn upsert_variant(
    State(state): State<AuthoringAppState>,
    RequireAuth(user): RequireAuth,
    Path(unit_id): Path<String>,
    body: Result<Json<UpsertVariantRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<VariantResponse>), ApiError> {
    let Json(req) = body?;

    let cmd = UpsertVariantCommand {
        author: user,
        unit_id: UnitId::new(unit_id)?,
        targeting: Targeting::from(req.targeting),
        content: ContentPayload::from_value(req.content)?,
    };

    let outcome = state.upsert_variant.handle(cmd).await?;
    let status = if outcome.is_replaced() {
        StatusCode::OK
    } else {
        StatusCode::CREATED
    };

    Ok((status, Json(outcome.into())))
}

impl From<UpsertDefaultContentError> for ApiError {
    fn from(err: UpsertDefaultContentError) -> Self {
        match err {
            UpsertDefaultContentError::Forbidden => ApiError::Forbidden(err.to_string()),
            UpsertDefaultContentError::UnitNotFound(id) => ApiError::not_found("Content unit", id),
            UpsertDefaultContentError::Infrastructure(msg) => ApiError::Internal(msg),
        }
    }
}

impl From<UpsertVariantError> for ApiError {
    fn from(err: UpsertVariantError) -> Self {
        match err {
            UpsertVariantError::Forbidden => ApiError::Forbidden(err.to_string()),
            UpsertVariantError::Validation(e) => e.into(),
            UpsertVariantError::UnitNotFound(id) => ApiError::not_found("Content unit", id),
            UpsertVariantError::Infrastructure(msg) => ApiError::Internal(msg),
        }
    }
}
