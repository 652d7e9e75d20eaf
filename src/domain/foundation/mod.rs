//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types
//! that form the vocabulary of the SkillPath domain.

mod auth;
mod errors;
mod ids;
mod percentage;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser, ROLE_AUTHOR, ROLE_LEARNER, ROLE_MANAGER};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{ModuleId, ScreenId, StepId, UnitId, UserId, VariantId};
pub use percentage::Percentage;
pub use timestamp::Timestamp;
