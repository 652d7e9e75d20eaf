//! Application layer - Services, Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Following CQRS, it separates command handlers (write) from query handlers (read).

pub mod content;
pub mod handlers;

#[cfg(test)]
pub(crate) mod test_support;

pub use content::{ContentAssembler, VariantResolver};
