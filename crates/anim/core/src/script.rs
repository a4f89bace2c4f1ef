//! Animation producers and the context they are invoked with.

use thiserror::Error;

use crate::sequence::{Sequence, TokenRef};
use crate::weapon::{AttackMode, WeaponInfo};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    #[error("animation script failed: {0}")]
    Failed(String),
}

/// Everything a script or macro may read about the attack being animated.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationContext {
    pub source_token: TokenRef,
    pub target_token: TokenRef,
    pub is_hit: bool,
    /// Final scale, global multiplier applied.
    pub scale: f64,
    /// Final speed in ms, global multiplier applied.
    pub speed: f64,
    pub attack_mode: AttackMode,
    pub weapon_info: WeaponInfo,
    pub sound_enabled: bool,
    pub sound_volume: f64,
}

/// Producer that adds effects and sounds to a fresh sequence.
///
/// The caller plays the sequence afterwards; scripts only describe it.
pub trait AnimationScript: Send + Sync {
    fn build(&self, seq: &mut Sequence, ctx: &AnimationContext) -> Result<(), ScriptError>;
}

impl<F> AnimationScript for F
where
    F: Fn(&mut Sequence, &AnimationContext) -> Result<(), ScriptError> + Send + Sync,
{
    fn build(&self, seq: &mut Sequence, ctx: &AnimationContext) -> Result<(), ScriptError> {
        self(seq, ctx)
    }
}
