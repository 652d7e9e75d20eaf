//! Content module - personalized content units and step structure.
//!
//! Everything here is pure: targeting predicates, match scoring, variant
//! resolution and the shapes of step outlines and assembled payloads.

mod payload;
mod scorer;
mod step;
mod targeting;
mod variant;

pub use payload::ContentPayload;
pub use scorer::{score, MatchResult};
pub use step::{
    ComponentPayload, ComponentType, PartTag, ScreenOutline, ScreenPayload, Slot, StepOutline,
    StepPayload, StepType, UnitKind, UnitRef,
};
pub use targeting::{
    AxisPredicate, AxisValue, TargetAxis, Targeting, TargetingFields, TargetingSubject, MAX_LEVEL,
};
pub use variant::{resolve_unit, ContentUnit, ResolvedContent, VariantRecord, VariantUpsert};
