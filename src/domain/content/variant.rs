//! Content units, their targeted variants, and variant resolution.

use serde::{Deserialize, Serialize};

use super::payload::ContentPayload;
use super::scorer::score;
use super::targeting::{Targeting, TargetingSubject};
use crate::domain::foundation::{UnitId, VariantId};

/// An alternative payload for a unit, aimed at part of the audience.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantRecord {
    pub id: VariantId,
    #[serde(flatten)]
    pub targeting: Targeting,
    pub content: ContentPayload,
}

impl VariantRecord {
    pub fn new(id: VariantId, targeting: Targeting, content: ContentPayload) -> Self {
        Self {
            id,
            targeting,
            content,
        }
    }
}

/// A piece of step content with a default payload and its variants.
///
/// Variant order is significant: it is the storage/authoring order and
/// breaks specificity ties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentUnit {
    pub id: UnitId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<ContentPayload>,
    #[serde(default)]
    pub variants: Vec<VariantRecord>,
}

impl ContentUnit {
    pub fn new(id: UnitId, default: Option<ContentPayload>) -> Self {
        Self {
            id,
            default,
            variants: Vec::new(),
        }
    }

    pub fn with_variant(mut self, variant: VariantRecord) -> Self {
        self.variants.push(variant);
        self
    }

    /// Replaces the content of the variant with identical targeting, or
    /// appends a new variant at the end of the fetch order.
    ///
    /// A replaced variant keeps its id and position, so its tie-break rank
    /// is unchanged.
    pub fn upsert_variant(&mut self, targeting: Targeting, content: ContentPayload) -> VariantUpsert {
        if let Some(existing) = self.variants.iter_mut().find(|v| v.targeting == targeting) {
            existing.content = content;
            return VariantUpsert::Replaced(existing.clone());
        }

        let record = VariantRecord::new(VariantId::generate(), targeting, content);
        self.variants.push(record.clone());
        VariantUpsert::Appended(record)
    }

    /// Resolves this unit for `subject`. See [`resolve_unit`].
    pub fn resolve(&self, subject: &impl TargetingSubject) -> Option<ResolvedContent> {
        resolve_unit(self.default.as_ref(), &self.variants, subject)
    }
}

/// Outcome of [`ContentUnit::upsert_variant`].
#[derive(Debug, Clone, PartialEq)]
pub enum VariantUpsert {
    Replaced(VariantRecord),
    Appended(VariantRecord),
}

impl VariantUpsert {
    pub fn record(&self) -> &VariantRecord {
        match self {
            VariantUpsert::Replaced(record) | VariantUpsert::Appended(record) => record,
        }
    }

    pub fn into_record(self) -> VariantRecord {
        match self {
            VariantUpsert::Replaced(record) | VariantUpsert::Appended(record) => record,
        }
    }

    pub fn is_replaced(&self) -> bool {
        matches!(self, VariantUpsert::Replaced(_))
    }
}

/// The payload chosen for one unit and one subject.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedContent {
    pub content: ContentPayload,
    /// Winning variant, or `None` when the default was used as-is.
    pub variant_id: Option<VariantId>,
    pub specificity: usize,
}

/// Picks the best matching variant and overlays it on the default.
///
/// Among matching variants the highest specificity wins; on a tie the one
/// that comes first in `variants` wins. The result is the default with
/// the winner's keys overlaid. Without a match the default is returned
/// unchanged. Returns `None` only when there is neither a default nor a
/// matching variant.
pub fn resolve_unit(
    default: Option<&ContentPayload>,
    variants: &[VariantRecord],
    subject: &impl TargetingSubject,
) -> Option<ResolvedContent> {
    let mut best: Option<(&VariantRecord, usize)> = None;

    for variant in variants {
        let result = score(&variant.targeting, subject);
        if !result.matches {
            continue;
        }
        let beats_best = match best {
            Some((_, specificity)) => result.specificity > specificity,
            None => true,
        };
        if beats_best {
            best = Some((variant, result.specificity));
        }
    }

    match (best, default) {
        (Some((variant, specificity)), Some(default)) => Some(ResolvedContent {
            content: default.overlay(&variant.content),
            variant_id: Some(variant.id.clone()),
            specificity,
        }),
        (Some((variant, specificity)), None) => Some(ResolvedContent {
            content: variant.content.clone(),
            variant_id: Some(variant.id.clone()),
            specificity,
        }),
        (None, Some(default)) => Some(ResolvedContent {
            content: default.clone(),
            variant_id: None,
            specificity: 0,
        }),
        (None, None) => None,
    }
}
