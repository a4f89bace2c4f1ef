//! Renderer that prints sequences to the log instead of a canvas.
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tracing::info;

use anim_core::{Sequence, SequenceStep};
use runtime::{RenderError, Renderer};

#[derive(Debug, Default)]
pub struct TracingRenderer {
    played: AtomicUsize,
}

impl TracingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sequences played so far.
    pub fn played(&self) -> usize {
        self.played.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl Renderer for TracingRenderer {
    async fn play(&self, sequence: Sequence) -> Result<(), RenderError> {
        if sequence.is_empty() {
            return Err(RenderError::new("sequence has no steps"));
        }

        let index = self.played.fetch_add(1, Ordering::Relaxed) + 1;
        for step in sequence.steps() {
            match step {
                SequenceStep::Effect(effect) => info!(
                    target: "strikefx::render",
                    sequence = index,
                    module = sequence.module_id(),
                    file = effect.file.as_deref().unwrap_or("-"),
                    from = effect.anchor.as_ref().map_or("-", |t| t.name.as_str()),
                    to = effect.stretch_target.as_ref().map_or("-", |t| t.name.as_str()),
                    scale = effect.scale,
                    speed = ?effect.speed,
                    opacity = effect.opacity,
                    missed = effect.missed,
                    rotate = effect.random_rotation,
                    offset = ?effect.miss_offset,
                    "effect"
                ),
                SequenceStep::Sound(sound) => info!(
                    target: "strikefx::render",
                    sequence = index,
                    file = sound.file.as_deref().unwrap_or("-"),
                    volume = sound.volume,
                    delay_ms = sound.delay_ms,
                    "sound"
                ),
            }
        }
        Ok(())
    }
}
