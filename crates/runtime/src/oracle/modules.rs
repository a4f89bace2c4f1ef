//! Set of active host modules.
use std::collections::HashSet;
use std::sync::{PoisonError, RwLock};

use crate::api::ModuleOracle;

#[derive(Debug, Default)]
pub struct ModuleOracleImpl {
    active: RwLock<HashSet<String>>,
}

impl ModuleOracleImpl {
    pub fn with_active<I, S>(modules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            active: RwLock::new(modules.into_iter().map(Into::into).collect()),
        }
    }

    pub fn set_active(&self, module_id: &str, active: bool) {
        let mut modules = self.active.write().unwrap_or_else(PoisonError::into_inner);
        if active {
            modules.insert(module_id.to_string());
        } else {
            modules.remove(module_id);
        }
    }
}

impl ModuleOracle for ModuleOracleImpl {
    fn is_active(&self, module_id: &str) -> bool {
        self.active
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(module_id)
    }
}
