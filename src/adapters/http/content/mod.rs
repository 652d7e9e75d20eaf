//! HTTP adapter for learner-facing content endpoints.
//!
//! - `GET /steps/:step_id` - Step resolved for the caller's profile
//! - `GET /modules` - Module catalog
//! - `GET /modules/:module_id` - One module with its steps
//! - `GET /progress` - Caller's progress records
//! - `POST /progress` - Create or update progress on a step

mod dto;
mod handlers;
mod routes;

pub use dto::{ProgressResponse, UpdateProgressRequest};
pub use handlers::ContentAppState;
pub use routes::content_routes;
