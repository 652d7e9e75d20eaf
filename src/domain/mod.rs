//! Domain layer - pure types and rules, no I/O.

pub mod catalog;
pub mod content;
pub mod foundation;
pub mod learner;
pub mod progress;
pub mod user;
