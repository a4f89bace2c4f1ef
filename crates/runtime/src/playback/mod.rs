//! Playback: runs a producer once per target.
//!
//! Targets are played one after another. A failure on one target is logged
//! and counted, then the next target is played.

mod composer;

pub use composer::{
    EFFECT_Z_INDEX, MELEE_MISS_OPACITY, MELEE_SOUND_DELAY_MS, RANGED_MISS_OPACITY,
    RANGED_SOUND_DELAY_MS, compose_direct, final_scale, final_speed,
};

use std::sync::{Arc, Mutex, PoisonError};

use rand::rngs::StdRng;
use tracing::error;

use anim_core::{AnimationContext, Sequence, TokenRef};

use crate::api::{MacroScope, Renderer, Result, RuntimeError};
use crate::loader::Producer;

/// Tally of one multi-target run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetRun {
    pub targets: usize,
    pub failed: usize,
    /// Failures raised by a script or macro rather than the renderer.
    pub producer_failures: usize,
    pub last_error: Option<String>,
}

impl TargetRun {
    pub fn all_failed(&self) -> bool {
        self.targets > 0 && self.failed == self.targets
    }
}

pub struct Playback {
    module_id: String,
    renderer: Arc<dyn Renderer>,
    rng: Mutex<StdRng>,
}

impl Playback {
    pub fn new(module_id: impl Into<String>, renderer: Arc<dyn Renderer>, rng: StdRng) -> Self {
        Self {
            module_id: module_id.into(),
            renderer,
            rng: Mutex::new(rng),
        }
    }

    pub fn renderer(&self) -> &Arc<dyn Renderer> {
        &self.renderer
    }

    pub fn new_sequence(&self) -> Sequence {
        Sequence::new(self.module_id.as_str())
    }

    /// Plays `producer` against each target in turn.
    ///
    /// `base` supplies everything but the target token.
    pub async fn play_targets(
        &self,
        producer: &Producer,
        base: &AnimationContext,
        targets: &[TokenRef],
        grid_size: f64,
    ) -> TargetRun {
        let mut run = TargetRun {
            targets: targets.len(),
            ..Default::default()
        };

        for target in targets {
            let ctx = AnimationContext {
                target_token: target.clone(),
                ..base.clone()
            };
            if let Err(err) = self.play_target(producer, ctx, grid_size).await {
                error!(
                    target: "runtime::playback",
                    target_token = %target.id,
                    error = %err,
                    source = ?std::error::Error::source(&err).map(ToString::to_string),
                    "error playing animation"
                );
                run.failed += 1;
                if err.is_producer_failure() {
                    run.producer_failures += 1;
                }
                run.last_error = Some(err.to_string());
            }
        }

        run
    }

    pub async fn play_target(
        &self,
        producer: &Producer,
        ctx: AnimationContext,
        grid_size: f64,
    ) -> Result<()> {
        match producer {
            Producer::Script { path, script } => {
                let mut seq = self.new_sequence();
                script
                    .build(&mut seq, &ctx)
                    .map_err(|source| RuntimeError::Script {
                        path: path.clone(),
                        source,
                    })?;
                self.renderer.play(seq).await?;
            }
            Producer::Macro { reference, handle } => {
                let scope = MacroScope {
                    context: ctx,
                    module_id: self.module_id.clone(),
                    sequencer: Arc::clone(&self.renderer),
                };
                handle
                    .execute(&scope)
                    .await
                    .map_err(|source| RuntimeError::Macro {
                        reference: reference.clone(),
                        source,
                    })?;
            }
            Producer::DirectAsset { animation, sound } => {
                let mut seq = self.new_sequence();
                {
                    let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
                    compose_direct(
                        &mut seq,
                        animation,
                        sound.as_deref(),
                        &ctx,
                        grid_size,
                        &mut *rng,
                    );
                }
                self.renderer.play(seq).await?;
            }
        }
        Ok(())
    }
}
