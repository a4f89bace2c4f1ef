//! Hit/miss determination and the on-hit-only policy.

use crate::api::TargetInfo;
use crate::settings::EngineSettings;

/// Hit outcome of a primary-channel roll.
///
/// Compares the roll total against the target's defense; anything that
/// cannot be compared counts as a hit.
pub fn determine_hit(roll_total: Option<f64>, target: Option<&TargetInfo>) -> bool {
    match (roll_total, target.and_then(TargetInfo::defense_value)) {
        (Some(total), Some(defense)) => total >= defense,
        _ => true,
    }
}

/// Whether an outcome should be animated under the current settings.
pub fn should_animate(is_hit: bool, settings: &EngineSettings) -> bool {
    is_hit || !settings.only_on_hit || settings.miss_animation
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defense(eac: f64) -> TargetInfo {
        TargetInfo {
            eac: Some(eac),
            ..Default::default()
        }
    }

    #[test]
    fn roll_against_defense() {
        assert!(determine_hit(Some(15.0), Some(&defense(14.0))));
        assert!(determine_hit(Some(14.0), Some(&defense(14.0))));
        assert!(!determine_hit(Some(13.0), Some(&defense(14.0))));
    }

    #[test]
    fn unresolvable_defaults_to_hit() {
        assert!(determine_hit(Some(2.0), None));
        assert!(determine_hit(Some(2.0), Some(&TargetInfo::default())));
        assert!(determine_hit(None, Some(&defense(30.0))));
    }

    #[test]
    fn kac_used_without_eac() {
        let target = TargetInfo {
            kac: Some(18.0),
            ..Default::default()
        };
        assert!(!determine_hit(Some(17.0), Some(&target)));
    }

    #[test]
    fn only_on_hit_policy() {
        let mut settings = EngineSettings::default();
        assert!(should_animate(false, &settings));

        settings.only_on_hit = true;
        assert!(should_animate(true, &settings));
        assert!(should_animate(false, &settings));

        settings.miss_animation = false;
        assert!(!should_animate(false, &settings));
        assert!(should_animate(true, &settings));
    }
}
