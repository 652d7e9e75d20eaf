//! GetModuleHandler - Query handler for a single module.

use std::sync::Arc;

use crate::domain::catalog::LearningModule;
use crate::domain::foundation::{DomainError, ModuleId};
use crate::ports::CatalogReader;

#[derive(Debug, Clone)]
pub struct GetModuleQuery {
    pub module_id: ModuleId,
}

pub type GetModuleResult = LearningModule;

#[derive(Debug, Clone, thiserror::Error)]
pub enum GetModuleError {
    #[error("Module not found: {0}")]
    NotFound(ModuleId),

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

impl From<DomainError> for GetModuleError {
    fn from(err: DomainError) -> Self {
        GetModuleError::Infrastructure(err.message)
    }
}

pub struct GetModuleHandler {
    reader: Arc<dyn CatalogReader>,
}

impl GetModuleHandler {
    pub fn new(reader: Arc<dyn CatalogReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(&self, query: GetModuleQuery) -> Result<GetModuleResult, GetModuleError> {
        let mut module = self
            .reader
            .get_module(&query.module_id)
            .await?
            .ok_or(GetModuleError::NotFound(query.module_id))?;
        module.sort_steps();
        Ok(module)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::MockCatalogReader;

    fn word() -> LearningModule {
        LearningModule {
            module_id: ModuleId::new("01-word").unwrap(),
            title: "Microsoft Word".into(),
            description: None,
            position: 1,
            steps: vec![],
        }
    }

    #[tokio::test]
    async fn returns_known_module() {
        let handler = GetModuleHandler::new(Arc::new(MockCatalogReader::with_modules(vec![word()])));

        let module = handler
            .handle(GetModuleQuery {
                module_id: ModuleId::new("01-word").unwrap(),
            })
            .await
            .unwrap();

        assert_eq!(module.title, "Microsoft Word");
    }

    #[tokio::test]
    async fn unknown_module_is_not_found() {
        let handler = GetModuleHandler::new(Arc::new(MockCatalogReader::with_modules(vec![word()])));

        let result = handler
            .handle(GetModuleQuery {
                module_id: ModuleId::new("99-nope").unwrap(),
            })
            .await;

        assert!(matches!(result, Err(GetModuleError::NotFound(_))));
    }

    #[tokio::test]
    async fn read_failure_is_infrastructure_error() {
        let handler = GetModuleHandler::new(Arc::new(MockCatalogReader::failing()));

        let result = handler
            .handle(GetModuleQuery {
                module_id: ModuleId::new("01-word").unwrap(),
            })
            .await;

        assert!(matches!(result, Err(GetModuleError::Infrastructure(_))));
    }
}
