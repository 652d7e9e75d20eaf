//! HTTP adapter for content authoring (AUTHOR role only).
//!
//! - `PUT /units/:unit_id/default` - Replace a unit's default content
//! - `PUT /units/:unit_id/variants` - Create or update a targeted variant

mod dto;
mod handlers;
mod routes;

pub use dto::{
    ContentUnitResponse, UpsertDefaultRequest, UpsertVariantRequest, VariantResponse,
};
pub use handlers::AuthoringAppState;
pub use routes::authoring_routes;
