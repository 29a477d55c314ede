//! # Module Registry
//!
//! Named table functions available to a host connection. Names compare
//! case-insensitively, like the host's own identifiers.

use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::observability::{log_event, Event};
use crate::schema::{SchemaError, SchemaResult};

use super::table::TableFuncModule;

/// Registry of table function modules
#[derive(Debug, Default)]
pub struct ModuleRegistry {
    /// Modules by lowercased name
    modules: RwLock<BTreeMap<String, Arc<TableFuncModule>>>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a module under its own name
    pub fn register(&self, module: TableFuncModule) -> SchemaResult<Arc<TableFuncModule>> {
        let key = module.name().to_ascii_lowercase();
        let mut modules = self.modules.write().unwrap_or_else(PoisonError::into_inner);
        if modules.contains_key(&key) {
            return Err(SchemaError::module_exists(module.name()));
        }

        log_event(
            module.config().log_level,
            Event::ModuleRegistered,
            &[("table", module.name())],
        );
        let module = Arc::new(module);
        modules.insert(key, Arc::clone(&module));
        Ok(module)
    }

    /// Look up a module by name
    pub fn get(&self, name: &str) -> Option<Arc<TableFuncModule>> {
        let modules = self.modules.read().unwrap_or_else(PoisonError::into_inner);
        modules.get(&name.to_ascii_lowercase()).cloned()
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<String> {
        let modules = self.modules.read().unwrap_or_else(PoisonError::into_inner);
        modules.values().map(|m| m.name().to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.modules.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
