//! Sources of user-authored animation producers.
//!
//! Scripts are imported by path from the module directory and expose either a
//! `default` or an `execute` entry point. Macros live in the host's macro
//! directory and run with a fixed scope of bindings.
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use anim_core::{AnimationContext, AnimationScript};

use super::renderer::Renderer;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptLoadError {
    #[error("no script at {0}")]
    NotFound(String),

    #[error("script at {path} could not be loaded: {message}")]
    Invalid { path: String, message: String },
}

/// Entry points exported by an imported script module.
#[derive(Clone, Default)]
pub struct ScriptModule {
    pub default: Option<Arc<dyn AnimationScript>>,
    pub execute: Option<Arc<dyn AnimationScript>>,
}

impl ScriptModule {
    pub fn with_default(script: Arc<dyn AnimationScript>) -> Self {
        Self {
            default: Some(script),
            execute: None,
        }
    }

    pub fn with_execute(script: Arc<dyn AnimationScript>) -> Self {
        Self {
            default: None,
            execute: Some(script),
        }
    }

    /// The callable the loader caches: `default`, else `execute`.
    pub fn entry_point(&self) -> Option<Arc<dyn AnimationScript>> {
        self.default.clone().or_else(|| self.execute.clone())
    }
}

impl fmt::Debug for ScriptModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptModule")
            .field("default", &self.default.is_some())
            .field("execute", &self.execute.is_some())
            .finish()
    }
}

/// Imports script modules by normalized path.
#[async_trait]
pub trait ScriptSource: Send + Sync {
    async fn import(&self, path: &str) -> Result<ScriptModule, ScriptLoadError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("macro raised: {0}")]
pub struct MacroError(pub String);

/// Bindings injected into a macro invocation.
///
/// `sequencer` is the same renderer the engine plays through, so a macro can
/// build a `Sequence` under `module_id` and play it itself.
#[derive(Clone)]
pub struct MacroScope {
    pub context: AnimationContext,
    pub module_id: String,
    pub sequencer: Arc<dyn Renderer>,
}

impl fmt::Debug for MacroScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MacroScope")
            .field("context", &self.context)
            .field("module_id", &self.module_id)
            .finish_non_exhaustive()
    }
}

#[async_trait]
pub trait Macro: Send + Sync {
    fn name(&self) -> &str;

    async fn execute(&self, scope: &MacroScope) -> Result<(), MacroError>;
}

/// Host macro directory, searched by id first and by name second.
pub trait MacroDirectory: Send + Sync {
    fn by_id(&self, id: &str) -> Option<Arc<dyn Macro>>;

    fn by_name(&self, name: &str) -> Option<Arc<dyn Macro>>;

    fn find(&self, reference: &str) -> Option<Arc<dyn Macro>> {
        self.by_id(reference).or_else(|| self.by_name(reference))
    }
}
