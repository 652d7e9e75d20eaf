//! HTTP adapter for users.
//!
//! - `GET /` - Directory listing (MANAGER and AUTHOR only)
//! - `GET /profile` - Identity plus the targeting profile used for content
//! - `PUT /profile` - Edit the caller's directory profile

mod dto;
mod handlers;
mod routes;

pub use dto::{UpdateProfileRequest, UserAccountResponse, UserProfileResponse};
pub use handlers::UsersAppState;
pub use routes::users_routes;
