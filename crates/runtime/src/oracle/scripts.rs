//! In-memory script library and macro directory.
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use anim_core::AnimationScript;

use crate::api::{Macro, MacroDirectory, ScriptLoadError, ScriptModule, ScriptSource};

/// ScriptSource serving modules registered ahead of time.
///
/// Paths are stored under `root`, matching what the loader asks for.
#[derive(Clone, Default)]
pub struct ScriptLibraryImpl {
    root: String,
    modules: HashMap<String, ScriptModule>,
}

impl ScriptLibraryImpl {
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            modules: HashMap::new(),
        }
    }

    /// Registers a script's default entry point under `root/relative_path`.
    pub fn register(&mut self, relative_path: &str, script: Arc<dyn AnimationScript>) {
        let path = format!("{}/{}", self.root, relative_path.trim_start_matches('/'));
        self.modules.insert(path, ScriptModule::with_default(script));
    }

    /// Registers a module at an exact path.
    pub fn register_module(&mut self, path: impl Into<String>, module: ScriptModule) {
        self.modules.insert(path.into(), module);
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

#[async_trait]
impl ScriptSource for ScriptLibraryImpl {
    async fn import(&self, path: &str) -> Result<ScriptModule, ScriptLoadError> {
        self.modules
            .get(path)
            .cloned()
            .ok_or_else(|| ScriptLoadError::NotFound(path.to_string()))
    }
}

/// Macros keyed by id, with a secondary name index.
#[derive(Clone, Default)]
pub struct MacroDirectoryImpl {
    by_id: HashMap<String, Arc<dyn Macro>>,
    names: HashMap<String, String>,
}

impl MacroDirectoryImpl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, handle: Arc<dyn Macro>) {
        let id = id.into();
        self.names.insert(handle.name().to_string(), id.clone());
        self.by_id.insert(id, handle);
    }

    pub fn with_macro(mut self, id: impl Into<String>, handle: Arc<dyn Macro>) -> Self {
        self.insert(id, handle);
        self
    }
}

impl MacroDirectory for MacroDirectoryImpl {
    fn by_id(&self, id: &str) -> Option<Arc<dyn Macro>> {
        self.by_id.get(id).cloned()
    }

    fn by_name(&self, name: &str) -> Option<Arc<dyn Macro>> {
        self.names.get(name).and_then(|id| self.by_id(id))
    }
}
