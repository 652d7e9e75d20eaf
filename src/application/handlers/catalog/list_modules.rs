//! ListModulesHandler - Query handler for the module catalog.

use std::sync::Arc;

use crate::domain::catalog::LearningModule;
use crate::domain::foundation::DomainError;
use crate::ports::CatalogReader;

/// Query to list every module.
#[derive(Debug, Clone, Default)]
pub struct ListModulesQuery;

pub type ListModulesResult = Vec<LearningModule>;

#[derive(Debug, Clone, thiserror::Error)]
pub enum ListModulesError {
    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

impl From<DomainError> for ListModulesError {
    fn from(err: DomainError) -> Self {
        ListModulesError::Infrastructure(err.message)
    }
}

/// Returns all modules ordered by position, steps ordered within each.
pub struct ListModulesHandler {
    reader: Arc<dyn CatalogReader>,
}

impl ListModulesHandler {
    pub fn new(reader: Arc<dyn CatalogReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(&self, _query: ListModulesQuery) -> Result<ListModulesResult, ListModulesError> {
        let mut modules = self.reader.list_modules().await?;
        modules.sort_by_key(|m| m.position);
        for module in &mut modules {
            module.sort_steps();
        }
        Ok(modules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::MockCatalogReader;
    use crate::domain::catalog::StepSummary;
    use crate::domain::content::StepType;
    use crate::domain::foundation::{ModuleId, StepId};

    fn module(id: &str, position: u32, steps: &[(&str, u32)]) -> LearningModule {
        LearningModule {
            module_id: ModuleId::new(id).unwrap(),
            title: id.to_string(),
            description: None,
            position,
            steps: steps
                .iter()
                .map(|(step, order)| StepSummary {
                    step_id: StepId::new(*step).unwrap(),
                    title: step.to_string(),
                    step_type: StepType::Skill,
                    order: *order,
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn lists_modules_and_steps_in_order() {
        let reader = MockCatalogReader::with_modules(vec![
            module("02-excel", 2, &[]),
            module("01-word", 1, &[("word_h1", 3), ("word_v1", 1), ("word_s1", 2)]),
        ]);
        let handler = ListModulesHandler::new(Arc::new(reader));

        let modules = handler.handle(ListModulesQuery).await.unwrap();

        assert_eq!(modules[0].module_id.as_str(), "01-word");
        assert_eq!(modules[1].module_id.as_str(), "02-excel");
        let steps: Vec<_> = modules[0].steps.iter().map(|s| s.step_id.as_str()).collect();
        assert_eq!(steps, vec!["word_v1", "word_s1", "word_h1"]);
    }

    #[tokio::test]
    async fn empty_catalog_is_not_an_error() {
        let handler = ListModulesHandler::new(Arc::new(MockCatalogReader::default()));
        assert!(handler.handle(ListModulesQuery).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn read_failure_is_infrastructure_error() {
        let handler = ListModulesHandler::new(Arc::new(MockCatalogReader::failing()));
        let result = handler.handle(ListModulesQuery).await;
        assert!(matches!(result, Err(ListModulesError::Infrastructure(_))));
    }
}
