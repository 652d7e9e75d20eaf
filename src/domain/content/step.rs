//! Step outlines (what a step is made of) and assembled step payloads
//! (what a learner receives).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::payload::ContentPayload;
use crate::domain::foundation::{ScreenId, StepId, UnitId, ValidationError, VariantId};

// ════════════════════════════════════════════════════════════════════════════
// Classifiers
// ════════════════════════════════════════════════════════════════════════════

/// Kind of learning step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StepType {
    #[serde(rename = "VIDEO")]
    Video,
    #[serde(rename = "SKILL")]
    Skill,
    #[serde(rename = "HANDSON")]
    HandsOn,
}

impl StepType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepType::Video => "VIDEO",
            StepType::Skill => "SKILL",
            StepType::HandsOn => "HANDSON",
        }
    }
}

impl fmt::Display for StepType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StepType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "VIDEO" => Ok(StepType::Video),
            "SKILL" => Ok(StepType::Skill),
            "HANDSON" => Ok(StepType::HandsOn),
            other => Err(ValidationError::invalid_format(
                "step_type",
                format!("unknown step type '{}'", other),
            )),
        }
    }
}

/// Discriminant of an emitted component.
///
/// Unknown discriminants found in content are carried through verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ComponentType {
    Instructions,
    VideoDisplay,
    QuestionMultichoice,
    QuestionOpen,
    HandsOnTask,
    Other(String),
}

impl ComponentType {
    pub fn as_str(&self) -> &str {
        match self {
            ComponentType::Instructions => "INSTRUCTIONS",
            ComponentType::VideoDisplay => "VIDEO_DISPLAY",
            ComponentType::QuestionMultichoice => "QUESTION_MULTICHOICE",
            ComponentType::QuestionOpen => "QUESTION_OPEN",
            ComponentType::HandsOnTask => "HANDSON_TASK",
            ComponentType::Other(s) => s,
        }
    }
}

impl From<&str> for ComponentType {
    fn from(s: &str) -> Self {
        match s {
            "INSTRUCTIONS" => ComponentType::Instructions,
            "VIDEO_DISPLAY" => ComponentType::VideoDisplay,
            "QUESTION_MULTICHOICE" => ComponentType::QuestionMultichoice,
            "QUESTION_OPEN" => ComponentType::QuestionOpen,
            "HANDSON_TASK" => ComponentType::HandsOnTask,
            other => ComponentType::Other(other.to_string()),
        }
    }
}

impl From<String> for ComponentType {
    fn from(s: String) -> Self {
        ComponentType::from(s.as_str())
    }
}

impl From<ComponentType> for String {
    fn from(t: ComponentType) -> Self {
        t.as_str().to_string()
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Placement of a component within a screen.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Slot {
    TopPanel,
    MainContent,
    Other(String),
}

impl Slot {
    pub fn as_str(&self) -> &str {
        match self {
            Slot::TopPanel => "top_panel",
            Slot::MainContent => "main_content",
            Slot::Other(s) => s,
        }
    }

    /// Sort rank within a screen: top panel, then main content, then the rest.
    pub fn rank(&self) -> u8 {
        match self {
            Slot::TopPanel => 0,
            Slot::MainContent => 1,
            Slot::Other(_) => 2,
        }
    }
}

impl From<String> for Slot {
    fn from(s: String) -> Self {
        match s.as_str() {
            "top_panel" => Slot::TopPanel,
            "main_content" => Slot::MainContent,
            _ => Slot::Other(s),
        }
    }
}

impl From<Slot> for String {
    fn from(slot: Slot) -> Self {
        slot.as_str().to_string()
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tag of a part-model unit on a skill screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartTag {
    Instructions,
    Mission,
}

impl PartTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            PartTag::Instructions => "instructions",
            PartTag::Mission => "mission",
        }
    }
}

impl FromStr for PartTag {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "instructions" => Ok(PartTag::Instructions),
            "mission" => Ok(PartTag::Mission),
            other => Err(ValidationError::invalid_format(
                "part",
                format!("unknown part tag '{}'", other),
            )),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Outline
// ════════════════════════════════════════════════════════════════════════════

/// How a unit referenced from a screen is turned into a component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UnitKind {
    /// Component model: type and slot are fixed by the outline.
    Component {
        #[serde(rename = "type")]
        component_type: ComponentType,
        slot: Slot,
    },
    /// Part model: type and slot follow from the tag.
    Part { part: PartTag },
}

/// A reference from a screen to one content unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitRef {
    pub unit_id: UnitId,
    #[serde(flatten)]
    pub kind: UnitKind,
}

impl UnitRef {
    pub fn component(unit_id: UnitId, component_type: ComponentType, slot: Slot) -> Self {
        Self {
            unit_id,
            kind: UnitKind::Component {
                component_type,
                slot,
            },
        }
    }

    pub fn part(unit_id: UnitId, part: PartTag) -> Self {
        Self {
            unit_id,
            kind: UnitKind::Part { part },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenOutline {
    pub screen_id: ScreenId,
    pub position: u32,
    pub units: Vec<UnitRef>,
}

/// The structure of a step, without any resolved content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepOutline {
    pub step_id: StepId,
    #[serde(rename = "type")]
    pub step_type: StepType,
    pub header: String,
    pub screens: Vec<ScreenOutline>,
}

impl StepOutline {
    /// Every unit id referenced by the step, in outline order.
    pub fn unit_ids(&self) -> Vec<UnitId> {
        self.screens
            .iter()
            .flat_map(|s| s.units.iter().map(|u| u.unit_id.clone()))
            .collect()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Assembled payload
// ════════════════════════════════════════════════════════════════════════════

/// A resolved, ready-to-render component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentPayload {
    pub component_id: UnitId,
    #[serde(rename = "type")]
    pub component_type: ComponentType,
    pub slot: Slot,
    pub content: ContentPayload,
    /// Variant that personalized this component, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_id: Option<VariantId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenPayload {
    pub screen_id: ScreenId,
    pub order: u32,
    pub components: Vec<ComponentPayload>,
}

/// A step with every unit resolved for one learner profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepPayload {
    pub step_id: StepId,
    #[serde(rename = "type")]
    pub step_type: StepType,
    pub header: String,
    pub screens: Vec<ScreenPayload>,
}
