//! Learner module - the targeting profile used for personalization.

mod profile;

pub use profile::{KnowledgeLevel, LearnerProfile, Role};
