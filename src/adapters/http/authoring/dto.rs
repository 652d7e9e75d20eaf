//! HTTP DTOs for authoring endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::content::{ContentUnit, TargetingFields, VariantRecord, VariantUpsert};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
pub struct UpsertDefaultRequest {
    /// Must be a JSON object.
    pub content: Value,
}

/// A variant is identified by its exact targeting: sending targeting that
/// already exists on the unit replaces that variant's content.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertVariantRequest {
    #[serde(flatten)]
    pub targeting: TargetingFields,
    pub content: Value,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentUnitResponse {
    pub unit_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    pub variant_count: usize,
}

impl From<ContentUnit> for ContentUnitResponse {
    fn from(unit: ContentUnit) -> Self {
        Self {
            unit_id: unit.id.to_string(),
            default: unit.default.map(|d| d.into_value()),
            variant_count: unit.variants.len(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantResponse {
    /// True when a new variant was appended, false when one was replaced.
    pub created: bool,
    pub variant: VariantRecord,
}

impl From<VariantUpsert> for VariantResponse {
    fn from(outcome: VariantUpsert) -> Self {
        Self {
            created: !outcome.is_replaced(),
            variant: outcome.into_record(),
        }
    }
}
