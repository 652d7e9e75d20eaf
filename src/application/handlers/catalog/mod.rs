//! Catalog query handlers.

mod get_module;
mod list_modules;

pub use get_module::{GetModuleError, GetModuleHandler, GetModuleQuery, GetModuleResult};
pub use list_modules::{ListModulesError, ListModulesHandler, ListModulesQuery, ListModulesResult};
