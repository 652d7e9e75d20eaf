//! SkillPath - Personalized corporate e-learning backend
//!
//! Resolves every content unit of a learning step to the variant that best
//! matches the learner's targeting profile (role, level, language,
//! department), and serves modules, steps, progress and authoring over HTTP.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
