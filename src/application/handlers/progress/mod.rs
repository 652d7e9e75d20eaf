//! Progress command and query handlers.

mod list_progress;
mod update_progress;

pub use list_progress::{ListProgressError, ListProgressHandler, ListProgressQuery, ListProgressResult};
pub use update_progress::{
    UpdateProgressCommand, UpdateProgressError, UpdateProgressHandler, UpdateProgressResult,
};
