//! ContentAssembler - walks a step outline and resolves every unit for one
//! learner profile.

use futures::future::try_join_all;
use std::sync::Arc;

use super::resolver::VariantResolver;
use crate::domain::content::{
    ComponentPayload, ComponentType, PartTag, ResolvedContent, ScreenOutline, ScreenPayload, Slot,
    StepOutline, StepPayload, StepType, UnitKind, UnitRef,
};
use crate::domain::foundation::{ScreenId, StepId};
use crate::domain::learner::LearnerProfile;
use crate::ports::{VariantStore, VariantStoreError};

/// Content key holding a mission's component discriminant.
const MISSION_TYPE_KEY: &str = "type";

/// Builds personalized step payloads.
///
/// All units of a step are fetched concurrently; results are placed back
/// in outline order, so fetch completion order never affects the output.
#[derive(Clone)]
pub struct ContentAssembler {
    store: Arc<dyn VariantStore>,
    resolver: VariantResolver,
}

impl ContentAssembler {
    pub fn new(store: Arc<dyn VariantStore>) -> Self {
        let resolver = VariantResolver::new(store.clone());
        Self { store, resolver }
    }

    /// Assembles the step for `profile`.
    ///
    /// # Errors
    ///
    /// - `StepNotFound` for an unknown step (no partial payload)
    /// - `UnitNotFound` if the outline references a missing unit
    /// - `Unavailable` on storage failure
    pub async fn assemble_step(
        &self,
        step_id: &StepId,
        profile: &LearnerProfile,
    ) -> Result<StepPayload, VariantStoreError> {
        let outline = self.store.fetch_step_outline(step_id).await?;

        let unit_ids = outline.unit_ids();
        let resolved = try_join_all(unit_ids.iter().map(|id| self.resolver.resolve(id, profile)))
            .await?;

        let screens = match outline.step_type {
            StepType::Video => single_screen(&outline, resolved, ComponentType::VideoDisplay),
            StepType::HandsOn => single_screen(&outline, resolved, ComponentType::HandsOnTask),
            StepType::Skill => skill_screens(&outline, resolved),
        };

        tracing::debug!(
            step_id = %step_id,
            step_type = %outline.step_type,
            screens = screens.len(),
            units = unit_ids.len(),
            "Assembled step"
        );

        Ok(StepPayload {
            step_id: outline.step_id,
            step_type: outline.step_type,
            header: outline.header,
            screens,
        })
    }
}

/// VIDEO and HANDSON steps render as one synthetic screen whose components
/// all sit in the main content slot with the step's fixed type.
fn single_screen(
    outline: &StepOutline,
    resolved: Vec<Option<ResolvedContent>>,
    component_type: ComponentType,
) -> Vec<ScreenPayload> {
    let components = outline
        .screens
        .iter()
        .flat_map(|screen| screen.units.iter())
        .zip(resolved)
        .filter_map(|(unit, resolved)| {
            resolved.map(|r| component(unit, component_type.clone(), Slot::MainContent, r))
        })
        .collect();

    vec![ScreenPayload {
        screen_id: ScreenId::synthetic(&outline.step_id),
        order: 1,
        components,
    }]
}

/// SKILL steps keep their authored screens, ordered by position.
fn skill_screens(outline: &StepOutline, resolved: Vec<Option<ResolvedContent>>) -> Vec<ScreenPayload> {
    // Pair each screen with its slice of resolved units before reordering.
    let mut remaining = resolved.into_iter();
    let mut screens: Vec<(&ScreenOutline, Vec<Option<ResolvedContent>>)> = outline
        .screens
        .iter()
        .map(|screen| {
            let units = remaining.by_ref().take(screen.units.len()).collect();
            (screen, units)
        })
        .collect();
    screens.sort_by_key(|(screen, _)| screen.position);

    screens
        .into_iter()
        .map(|(screen, resolved)| {
            let mut components: Vec<ComponentPayload> = screen
                .units
                .iter()
                .zip(resolved)
                .filter_map(|(unit, resolved)| resolved.map(|r| skill_component(unit, r)))
                .collect();
            components.sort_by_key(|c| c.slot.rank());

            ScreenPayload {
                screen_id: screen.screen_id.clone(),
                order: screen.position,
                components,
            }
        })
        .collect()
}

fn skill_component(unit: &UnitRef, resolved: ResolvedContent) -> ComponentPayload {
    match &unit.kind {
        UnitKind::Component {
            component_type,
            slot,
        } => component(unit, component_type.clone(), slot.clone(), resolved),
        UnitKind::Part {
            part: PartTag::Instructions,
        } => component(unit, ComponentType::Instructions, Slot::TopPanel, resolved),
        UnitKind::Part {
            part: PartTag::Mission,
        } => {
            let mission_type = resolved
                .content
                .get_str(MISSION_TYPE_KEY)
                .map(ComponentType::from)
                .unwrap_or(ComponentType::QuestionMultichoice);
            component(unit, mission_type, Slot::MainContent, resolved)
        }
    }
}

fn component(
    unit: &UnitRef,
    component_type: ComponentType,
    slot: Slot,
    resolved: ResolvedContent,
) -> ComponentPayload {
    ComponentPayload {
        component_id: unit.unit_id.clone(),
        component_type,
        slot,
        content: resolved.content,
        variant_id: resolved.variant_id,
    }
}
