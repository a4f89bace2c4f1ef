//! Rendering collaborator that plays composed sequences.
use async_trait::async_trait;
use thiserror::Error;

use anim_core::Sequence;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("sequence playback failed: {message}")]
pub struct RenderError {
    pub message: String,
}

impl RenderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Plays effect sequences on the shared canvas.
///
/// The engine checks [`Renderer::is_available`] once at startup and before
/// every attack; a renderer that reports unavailable is never asked to play.
#[async_trait]
pub trait Renderer: Send + Sync {
    fn is_available(&self) -> bool {
        true
    }

    async fn play(&self, sequence: Sequence) -> Result<(), RenderError>;
}
