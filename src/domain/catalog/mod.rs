//! Catalog module - modules and the steps they are made of.

use serde::{Deserialize, Serialize};

use crate::domain::content::StepType;
use crate::domain::foundation::{ModuleId, StepId};

/// Short description of a step as listed in its module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepSummary {
    pub step_id: StepId,
    pub title: String,
    #[serde(rename = "type")]
    pub step_type: StepType,
    pub order: u32,
}

/// A learning module with its steps ordered by position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningModule {
    pub module_id: ModuleId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub position: u32,
    pub steps: Vec<StepSummary>,
}

impl LearningModule {
    /// Sorts steps by ascending order, keeping insertion order on ties.
    pub fn sort_steps(&mut self) {
        self.steps.sort_by_key(|s| s.order);
    }

    pub fn contains_step(&self, step_id: &StepId) -> bool {
        self.steps.iter().any(|s| &s.step_id == step_id)
    }
}
