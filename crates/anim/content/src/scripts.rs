//! Bundled animation scripts.

use std::collections::HashMap;
use std::sync::Arc;

use anim_core::{AnimationContext, AnimationScript, ScriptError, Sequence};

/// Z-order shared by every bundled effect.
pub const BUNDLED_Z_INDEX: i32 = 10;

/// How a bundled script marks a miss once the effect is faded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MissStyle {
    /// Let the renderer displace the endpoint.
    #[default]
    Missed,
    /// Spin the effect to suggest a glancing strike.
    RandomRotation,
}

/// Single-effect script recipe: one asset stretched from attacker to target.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BundledScript {
    pub file: String,
    pub miss_opacity: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub miss_style: MissStyle,
}

impl AnimationScript for BundledScript {
    fn build(&self, seq: &mut Sequence, ctx: &AnimationContext) -> Result<(), ScriptError> {
        let effect = seq
            .effect()
            .file(self.file.as_str())
            .at_location(&ctx.source_token)
            .stretch_to(&ctx.target_token)
            .scale(ctx.scale)
            .z_index(BUNDLED_Z_INDEX);

        if !ctx.is_hit {
            effect.opacity(self.miss_opacity);
            match self.miss_style {
                MissStyle::Missed => effect.missed(),
                MissStyle::RandomRotation => effect.random_rotation(),
            };
        }

        Ok(())
    }
}

/// Bundled scripts keyed by path relative to the module root.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScriptCatalog {
    pub scripts: HashMap<String, BundledScript>,
}

impl ScriptCatalog {
    pub fn get(&self, path: &str) -> Option<&BundledScript> {
        self.scripts.get(path)
    }

    pub fn len(&self) -> usize {
        self.scripts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scripts.is_empty()
    }

    /// Producers ready to register with a script source.
    pub fn producers(&self) -> impl Iterator<Item = (&str, Arc<dyn AnimationScript>)> + '_ {
        self.scripts.iter().map(|(path, script)| {
            (
                path.as_str(),
                Arc::new(script.clone()) as Arc<dyn AnimationScript>,
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anim_core::{AttackMode, Point, TokenRef, WeaponInfo};

    fn context(is_hit: bool) -> AnimationContext {
        AnimationContext {
            source_token: TokenRef::new("a", "Attacker", Point::new(0.0, 0.0)),
            target_token: TokenRef::new("b", "Target", Point::new(100.0, 0.0)),
            is_hit,
            scale: 0.6,
            speed: 500.0,
            attack_mode: AttackMode::Ranged,
            weapon_info: WeaponInfo::unknown(),
            sound_enabled: true,
            sound_volume: 0.5,
        }
    }

    #[test]
    fn hit_draws_plain_effect() {
        let script = BundledScript {
            file: "jb2a.bullet.01.orange".into(),
            miss_opacity: 0.5,
            miss_style: MissStyle::Missed,
        };
        let mut seq = Sequence::new("test");
        script.build(&mut seq, &context(true)).unwrap();

        let effect = seq.effects().next().unwrap();
        assert_eq!(effect.file.as_deref(), Some("jb2a.bullet.01.orange"));
        assert_eq!(effect.scale, 0.6);
        assert_eq!(effect.z_index, BUNDLED_Z_INDEX);
        assert_eq!(effect.opacity, 1.0);
        assert!(!effect.missed);
        assert_eq!(effect.stretch_target.as_ref().map(|t| t.id.as_str()), Some("b"));
    }

    #[test]
    fn melee_miss_rotates() {
        let script = BundledScript {
            file: "slash".into(),
            miss_opacity: 0.4,
            miss_style: MissStyle::RandomRotation,
        };
        let mut seq = Sequence::new("test");
        script.build(&mut seq, &context(false)).unwrap();

        let effect = seq.effects().next().unwrap();
        assert_eq!(effect.opacity, 0.4);
        assert!(effect.random_rotation);
        assert!(!effect.missed);
    }
}
