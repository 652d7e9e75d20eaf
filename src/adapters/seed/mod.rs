//! YAML content seed.
//!
//! Describes modules, their steps (with screen outlines), the content
//! units those screens reference and the registered users. Used to
//! populate the in-memory stores for development and tests.
//!
//! ```yaml
//! modules:
//!   - moduleId: 01-word
//!     title: Word
//!     position: 1
//!     steps:
//!       - stepId: word_v1
//!         title: Intro
//!         type: VIDEO
//!         order: 1
//!         screens:
//!           - screenId: "word_v1#screen-1"
//!             position: 1
//!             units:
//!               - { unitId: word_v1.video, kind: component, type: VIDEO_DISPLAY, slot: main_content }
//! units:
//!   - id: word_v1.video
//!     default: { vimeo_url: "https://player.vimeo.com/video/1" }
//! users:
//!   - { id: user_aya, email: aya@company.com, role: LEARNER, level: 1 }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tokio::fs;

use crate::domain::catalog::{LearningModule, StepSummary};
use crate::domain::content::{ContentUnit, ScreenOutline, StepOutline, StepType};
use crate::domain::foundation::{ModuleId, StepId, Timestamp, UnitId, UserId};
use crate::domain::learner::KnowledgeLevel;
use crate::domain::user::UserAccount;

/// Demo catalog shipped with the service.
const DEMO_SEED: &str = include_str!("../../../seed/content.yaml");

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Failed to read seed file: {0}")]
    Io(String),

    #[error("Failed to parse seed: {0}")]
    Parse(String),

    #[error("Duplicate step id in seed: {0}")]
    DuplicateStep(StepId),

    #[error("Duplicate unit id in seed: {0}")]
    DuplicateUnit(UnitId),

    #[error("Step {step_id} references unknown unit {unit_id}")]
    DanglingUnit { step_id: StepId, unit_id: UnitId },

    #[error("Duplicate user id in seed: {0}")]
    DuplicateUser(UserId),

    #[error("Invalid user {user_id}: {reason}")]
    InvalidUser { user_id: UserId, reason: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepSeed {
    pub step_id: StepId,
    pub title: String,
    #[serde(rename = "type")]
    pub step_type: StepType,
    pub order: u32,
    #[serde(default)]
    pub screens: Vec<ScreenOutline>,
}

impl StepSeed {
    pub fn summary(&self) -> StepSummary {
        StepSummary {
            step_id: self.step_id.clone(),
            title: self.title.clone(),
            step_type: self.step_type,
            order: self.order,
        }
    }

    pub fn outline(&self) -> StepOutline {
        StepOutline {
            step_id: self.step_id.clone(),
            step_type: self.step_type,
            header: self.title.clone(),
            screens: self.screens.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleSeed {
    pub module_id: ModuleId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub position: u32,
    #[serde(default)]
    pub steps: Vec<StepSeed>,
}

impl ModuleSeed {
    pub fn to_module(&self) -> LearningModule {
        let mut module = LearningModule {
            module_id: self.module_id.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            position: self.position,
            steps: self.steps.iter().map(StepSeed::summary).collect(),
        };
        module.sort_steps();
        module
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSeed {
    pub id: UserId,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    pub role: String,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default, alias = "copilotLanguage")]
    pub language: Option<String>,
    #[serde(default, alias = "aiKnowledgeLevel")]
    pub level: Option<u32>,
    /// Defaults to load time.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl UserSeed {
    pub fn to_account(&self) -> Result<UserAccount, SeedError> {
        let level = match self.level {
            Some(level) => KnowledgeLevel::new(level).map_err(|e| SeedError::InvalidUser {
                user_id: self.id.clone(),
                reason: e.to_string(),
            })?,
            None => KnowledgeLevel::default(),
        };

        Ok(UserAccount {
            id: self.id.clone(),
            email: self.email.clone(),
            name: self.name.clone(),
            role: self.role.clone(),
            department: self.department.clone(),
            language: self.language.clone(),
            level,
            created_at: self
                .created_at
                .map(Timestamp::from_datetime)
                .unwrap_or_else(Timestamp::now),
        })
    }
}

/// A complete, validated content catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentSeed {
    #[serde(default)]
    pub modules: Vec<ModuleSeed>,
    #[serde(default)]
    pub units: Vec<ContentUnit>,
    #[serde(default)]
    pub users: Vec<UserSeed>,
}

impl ContentSeed {
    /// Parses and validates a YAML seed.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, SeedError> {
        let seed: ContentSeed =
            serde_yaml::from_str(yaml).map_err(|e| SeedError::Parse(e.to_string()))?;
        seed.validate()?;
        Ok(seed)
    }

    /// Reads, parses and validates a YAML seed file.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, SeedError> {
        let path = path.as_ref();
        let yaml = fs::read_to_string(path)
            .await
            .map_err(|e| SeedError::Io(format!("{}: {}", path.display(), e)))?;
        let seed = Self::from_yaml_str(&yaml)?;

        tracing::info!(
            path = %path.display(),
            modules = seed.modules.len(),
            units = seed.units.len(),
            users = seed.users.len(),
            "Loaded content seed"
        );

        Ok(seed)
    }

    /// The demo catalog bundled with the crate.
    pub fn demo() -> Result<Self, SeedError> {
        Self::from_yaml_str(DEMO_SEED)
    }

    /// Every step across all modules.
    pub fn steps(&self) -> impl Iterator<Item = &StepSeed> {
        self.modules.iter().flat_map(|m| m.steps.iter())
    }

    /// Directory accounts for every seeded user.
    pub fn accounts(&self) -> Result<Vec<UserAccount>, SeedError> {
        self.users.iter().map(UserSeed::to_account).collect()
    }

    /// Checks id uniqueness, that every referenced unit exists and that
    /// every user is well formed.
    pub fn validate(&self) -> Result<(), SeedError> {
        let mut unit_ids = HashSet::new();
        for unit in &self.units {
            if !unit_ids.insert(&unit.id) {
                return Err(SeedError::DuplicateUnit(unit.id.clone()));
            }
        }

        let mut step_ids = HashSet::new();
        for step in self.steps() {
            if !step_ids.insert(&step.step_id) {
                return Err(SeedError::DuplicateStep(step.step_id.clone()));
            }
            for unit in step.screens.iter().flat_map(|s| s.units.iter()) {
                if !unit_ids.contains(&unit.unit_id) {
                    return Err(SeedError::DanglingUnit {
                        step_id: step.step_id.clone(),
                        unit_id: unit.unit_id.clone(),
                    });
                }
            }
        }

        let mut user_ids = HashSet::new();
        for user in &self.users {
            if !user_ids.insert(&user.id) {
                return Err(SeedError::DuplicateUser(user.id.clone()));
            }
            user.to_account()?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::content::{PartTag, UnitKind};
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SMALL: &str = r#"
modules:
  - moduleId: m1
    title: Module
    position: 1
    steps:
      - stepId: s1
        title: Step
        type: SKILL
        order: 1
        screens:
          - screenId: sc1
            position: 1
            units:
              - { unitId: u1, kind: part, part: mission }
units:
  - id: u1
    default: { questionText: Q }
    variants:
      - id: v1
        targetRole: IT
        targetLevel: 2
        content: { questionText: IT }
"#;

    #[test]
    fn parses_steps_screens_and_variants() {
        let seed = ContentSeed::from_yaml_str(SMALL).unwrap();

        let step = seed.steps().next().unwrap();
        assert_eq!(step.step_type, StepType::Skill);
        assert_eq!(
            step.screens[0].units[0].kind,
            UnitKind::Part {
                part: PartTag::Mission
            }
        );

        let unit = &seed.units[0];
        assert_eq!(unit.variants[0].targeting.declared_count(), 2);
        assert_eq!(unit.default.as_ref().unwrap().get_str("questionText"), Some("Q"));
    }

    #[test]
    fn rejects_dangling_unit_reference() {
        let yaml = SMALL.replace("unitId: u1", "unitId: u2");
        let result = ContentSeed::from_yaml_str(&yaml);
        assert!(matches!(result, Err(SeedError::DanglingUnit { .. })));
    }

    #[test]
    fn rejects_duplicate_units() {
        let yaml = format!("{}\n  - id: u1\n", SMALL.trim_end());
        let result = ContentSeed::from_yaml_str(&yaml);
        assert!(matches!(result, Err(SeedError::DuplicateUnit(_))));
    }

    #[test]
    fn rejects_duplicate_users() {
        let yaml = format!(
            "{}\nusers:\n  - {{ id: user_a, email: a@x.com, role: LEARNER }}\n  - {{ id: user_a, email: b@x.com, role: LEARNER }}\n",
            SMALL.trim_end()
        );
        let result = ContentSeed::from_yaml_str(&yaml);
        assert!(matches!(result, Err(SeedError::DuplicateUser(_))));
    }

    #[test]
    fn rejects_user_with_level_zero() {
        let yaml = format!(
            "{}\nusers:\n  - {{ id: user_a, email: a@x.com, role: LEARNER, level: 0 }}\n",
            SMALL.trim_end()
        );
        let result = ContentSeed::from_yaml_str(&yaml);
        assert!(matches!(result, Err(SeedError::InvalidUser { .. })));
    }

    #[test]
    fn rejects_malformed_yaml() {
        let result = ContentSeed::from_yaml_str("modules: [");
        assert!(matches!(result, Err(SeedError::Parse(_))));
    }

    #[test]
    fn demo_seed_is_valid() {
        let seed = ContentSeed::demo().unwrap();
        let steps: Vec<_> = seed.steps().map(|s| s.step_id.as_str()).collect();
        assert_eq!(steps, vec!["word_v1", "word_s1", "word_h1"]);
        assert_eq!(seed.modules.len(), 2);

        let accounts = seed.accounts().unwrap();
        assert_eq!(accounts.len(), 4);
        let yaniv = accounts.iter().find(|a| a.id.as_str() == "user_yaniv").unwrap();
        assert_eq!(yaniv.role, "MANAGER");
        assert_eq!(yaniv.level.value(), 2);
    }

    #[test]
    fn module_summary_is_ordered() {
        let seed = ContentSeed::demo().unwrap();
        let module = seed.modules[0].to_module();
        let orders: Vec<_> = module.steps.iter().map(|s| s.order).collect();
        assert_eq!(orders, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn loads_seed_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SMALL.as_bytes()).unwrap();

        let seed = ContentSeed::load(file.path()).await.unwrap();

        assert_eq!(seed.units.len(), 1);
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = ContentSeed::load(dir.path().join("absent.yaml")).await;
        assert!(matches!(result, Err(SeedError::Io(_))));
    }
}
