//! User module - directory accounts and self-service profile changes.

mod account;

pub use account::{ProfileChanges, UserAccount};
