//! Canonical weapon metadata and attack-mode classification.

mod normalize;

pub use normalize::extract_weapon_info;

/// Display name used when an item record carries no usable name.
pub const UNKNOWN_ITEM_NAME: &str = "Unknown";

/// How an effect travels between attacker and target.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum AttackMode {
    /// Effect anchored at the attacker and stretched to the target, no travel time.
    Melee,
    /// Projectile or beam that travels to the target.
    #[default]
    Ranged,
}

impl AttackMode {
    /// Default travel time (ms) used when synthesizing a descriptor for this mode.
    pub const fn default_speed(self) -> f64 {
        match self {
            AttackMode::Melee => 300.0,
            AttackMode::Ranged => 800.0,
        }
    }
}

/// Canonical weapon record derived from an item.
///
/// Always fully populated: absent fields are `None` and the name falls back to
/// [`UNKNOWN_ITEM_NAME`], so resolution never has to deal with a missing input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeaponInfo {
    /// Energy/special category, e.g. `laser`, `plasma`, `uncategorized`.
    pub weapon_category: Option<String>,
    /// Physical weapon class, e.g. `basicM`, `longA`, `sniper`.
    pub weapon_type: Option<String>,
    /// Attack action code, e.g. `mwak`, `rwak`, `msak`, `rsak`.
    pub action_type: Option<String>,
    /// Damage type of the first damage part.
    pub primary_damage_type: Option<String>,
    /// Stable identifier used for per-item overrides.
    pub item_id: Option<String>,
    pub item_name: String,
}

impl WeaponInfo {
    /// Record with every field empty.
    pub fn unknown() -> Self {
        Self {
            weapon_category: None,
            weapon_type: None,
            action_type: None,
            primary_damage_type: None,
            item_id: None,
            item_name: UNKNOWN_ITEM_NAME.to_string(),
        }
    }

    /// Melee when the action code or the weapon class says so, ranged otherwise.
    pub fn attack_mode(&self) -> AttackMode {
        let melee_action = matches!(self.action_type.as_deref(), Some("mwak" | "msak"));
        let melee_type = matches!(self.weapon_type.as_deref(), Some("basicM" | "advancedM"));

        if melee_action || melee_type {
            AttackMode::Melee
        } else {
            AttackMode::Ranged
        }
    }
}

impl Default for WeaponInfo {
    fn default() -> Self {
        Self::unknown()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attack_mode_from_action_type() {
        let info = WeaponInfo {
            action_type: Some("msak".into()),
            ..WeaponInfo::unknown()
        };
        assert_eq!(info.attack_mode(), AttackMode::Melee);
    }

    #[test]
    fn attack_mode_from_weapon_type() {
        let info = WeaponInfo {
            action_type: Some("rwak".into()),
            weapon_type: Some("advancedM".into()),
            ..WeaponInfo::unknown()
        };
        assert_eq!(info.attack_mode(), AttackMode::Melee);
    }

    #[test]
    fn attack_mode_defaults_to_ranged() {
        assert_eq!(WeaponInfo::unknown().attack_mode(), AttackMode::Ranged);
    }

    #[test]
    fn attack_mode_parses_lowercase() {
        assert_eq!("melee".parse::<AttackMode>().ok(), Some(AttackMode::Melee));
        assert_eq!(AttackMode::Ranged.to_string(), "ranged");
        assert!("cone".parse::<AttackMode>().is_err());
    }
}
