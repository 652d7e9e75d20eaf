//! User directory command and query handlers.

mod list_users;
mod update_profile;

pub use list_users::{ListUsersError, ListUsersHandler, ListUsersQuery, ListUsersResult};
pub use update_profile::{
    UpdateProfileCommand, UpdateProfileError, UpdateProfileHandler, UpdateProfileResult,
};
