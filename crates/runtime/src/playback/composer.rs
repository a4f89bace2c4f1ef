//! Direct-asset choreography for melee and ranged effects.
//!
//! Both modes anchor the effect at the attacker and stretch it to the target.
//! Ranged effects also travel for `speed` ms; melee effects appear at once.
//!
//! | outcome      | melee                       | ranged                              |
//! |--------------|-----------------------------|-------------------------------------|
//! | hit          | plain                       | plain                               |
//! | miss         | opacity 0.4, random rotation| opacity 0.5, missed, miss offset    |
//! | sound delay  | 100 ms                      | 0 ms                                |

use rand::Rng;

use anim_core::{AnimationContext, AttackMode, Sequence, miss_offset};

pub const EFFECT_Z_INDEX: i32 = 10;
pub const MELEE_MISS_OPACITY: f64 = 0.4;
pub const RANGED_MISS_OPACITY: f64 = 0.5;
pub const MELEE_SOUND_DELAY_MS: u64 = 100;
pub const RANGED_SOUND_DELAY_MS: u64 = 0;

/// Descriptor scale times the global scale setting.
pub fn final_scale(base: f64, multiplier: f64) -> f64 {
    base * multiplier
}

/// Descriptor travel time divided by the global speed setting.
pub fn final_speed(base: f64, multiplier: f64) -> f64 {
    base / multiplier
}

/// Fills `seq` with one effect, plus a sound cue when there is one to play.
pub fn compose_direct(
    seq: &mut Sequence,
    animation: &str,
    sound: Option<&str>,
    ctx: &AnimationContext,
    grid_size: f64,
    rng: &mut impl Rng,
) {
    let effect = seq
        .effect()
        .file(animation)
        .at_location(&ctx.source_token)
        .stretch_to(&ctx.target_token)
        .scale(ctx.scale)
        .z_index(EFFECT_Z_INDEX);

    match ctx.attack_mode {
        AttackMode::Melee => {
            if !ctx.is_hit {
                effect.opacity(MELEE_MISS_OPACITY).random_rotation();
            }
        }
        AttackMode::Ranged => {
            effect.speed(ctx.speed);
            if !ctx.is_hit {
                let offset = miss_offset(
                    ctx.source_token.center,
                    ctx.target_token.center,
                    grid_size,
                    rng,
                );
                effect
                    .opacity(RANGED_MISS_OPACITY)
                    .missed()
                    .miss_offset(offset);
            }
        }
    }

    if ctx.sound_enabled
        && let Some(sound) = sound
    {
        let delay = match ctx.attack_mode {
            AttackMode::Melee => MELEE_SOUND_DELAY_MS,
            AttackMode::Ranged => RANGED_SOUND_DELAY_MS,
        };
        seq.sound().file(sound).volume(ctx.sound_volume).delay(delay);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anim_core::{Point, SequenceStep, TokenRef, WeaponInfo};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn context(mode: AttackMode, is_hit: bool) -> AnimationContext {
        AnimationContext {
            source_token: TokenRef::new("src", "Vesk", Point::new(0.0, 0.0)),
            target_token: TokenRef::new("dst", "Goblin", Point::new(400.0, 0.0)),
            is_hit,
            scale: 0.8,
            speed: 400.0,
            attack_mode: mode,
            weapon_info: WeaponInfo::unknown(),
            sound_enabled: true,
            sound_volume: 0.7,
        }
    }

    fn compose(ctx: &AnimationContext, sound: Option<&str>) -> Sequence {
        let mut seq = Sequence::new("strikefx");
        let mut rng = StdRng::seed_from_u64(3);
        compose_direct(&mut seq, "jb2a.arrow", sound, ctx, 100.0, &mut rng);
        seq
    }

    #[test]
    fn multipliers() {
        assert_eq!(final_scale(0.5, 2.0), 1.0);
        assert_eq!(final_speed(800.0, 2.0), 400.0);
    }

    #[test]
    fn ranged_hit_travels() {
        let seq = compose(&context(AttackMode::Ranged, true), None);
        let effect = seq.effects().next().unwrap();
        assert_eq!(effect.speed, Some(400.0));
        assert_eq!(effect.z_index, EFFECT_Z_INDEX);
        assert_eq!(effect.opacity, 1.0);
        assert!(effect.miss_offset.is_none());
        assert_eq!(seq.steps().len(), 1);
    }

    #[test]
    fn ranged_miss_is_displaced() {
        let seq = compose(&context(AttackMode::Ranged, false), None);
        let effect = seq.effects().next().unwrap();
        assert!(effect.missed);
        assert_eq!(effect.opacity, RANGED_MISS_OPACITY);
        let offset = effect.miss_offset.unwrap();
        assert!(offset.x.abs() < 1e-9);
        assert!((50.0..=100.0).contains(&offset.y.abs()));
    }

    #[test]
    fn melee_is_instant_and_spins_on_miss() {
        let seq = compose(&context(AttackMode::Melee, false), None);
        let effect = seq.effects().next().unwrap();
        assert_eq!(effect.speed, None);
        assert!(effect.random_rotation);
        assert!(!effect.missed);
        assert_eq!(effect.opacity, MELEE_MISS_OPACITY);
    }

    #[test]
    fn sound_delay_follows_mode() {
        let melee = compose(&context(AttackMode::Melee, true), Some("sfx/slash.ogg"));
        let ranged = compose(&context(AttackMode::Ranged, true), Some("sfx/shot.ogg"));

        let melee_sound = melee.sounds().next().unwrap();
        assert_eq!(melee_sound.delay_ms, MELEE_SOUND_DELAY_MS);
        assert_eq!(melee_sound.volume, 0.7);
        assert_eq!(ranged.sounds().next().unwrap().delay_ms, RANGED_SOUND_DELAY_MS);
        assert!(matches!(melee.steps()[0], SequenceStep::Effect(_)));
    }

    #[test]
    fn sound_disabled_or_absent_is_skipped() {
        let mut ctx = context(AttackMode::Ranged, true);
        assert_eq!(compose(&ctx, None).sounds().count(), 0);

        ctx.sound_enabled = false;
        assert_eq!(compose(&ctx, Some("sfx/shot.ogg")).sounds().count(), 0);
    }
}
