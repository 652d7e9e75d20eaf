//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod authoring;
pub mod catalog;
pub mod content;
pub mod progress;
pub mod users;
