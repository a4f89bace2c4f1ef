//! Unified error types surfaced by the runtime API.
//!
//! Event handlers never return these to the host; they are logged and turned
//! into skip or failure notices. The manual API and the builder return them
//! directly so callers can bubble them up with consistent context.
use thiserror::Error;

use anim_core::ScriptError;

use super::renderer::RenderError;
use super::scripts::MacroError;
use crate::settings::SettingsError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("engine requires {0} to be configured before building")]
    MissingComponent(&'static str),

    #[error("animation renderer is not available")]
    RendererUnavailable,

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("animation script {path} failed")]
    Script {
        path: String,
        #[source]
        source: ScriptError,
    },

    #[error("animation macro {reference} failed")]
    Macro {
        reference: String,
        #[source]
        source: MacroError,
    },

    #[error(transparent)]
    Settings(#[from] SettingsError),
}

impl RuntimeError {
    /// Failures inside user-authored producers deserve a user-facing notice;
    /// renderer hiccups only go to the log.
    pub fn is_producer_failure(&self) -> bool {
        matches!(self, RuntimeError::Script { .. } | RuntimeError::Macro { .. })
    }
}
