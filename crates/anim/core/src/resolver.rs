//! Tiered weapon → descriptor resolution.
//!
//! Tiers are evaluated in order and the first hit wins; later tiers never merge
//! into an earlier result.
//!
//! ```text
//! 1  per-item override            items[item_id]
//! 2  custom mapping               custom[category], then custom["type_" + weapon_type]
//! 3  default category             categories[category]      (skipped for "uncategorized")
//! 4  default weapon type          weapon_types[weapon_type]
//! 4b uncategorized fallback       categories["uncategorized"]  (only when 3 was skipped)
//! 5  damage type                  damage_types[primary_damage_type]
//! 6  asset pack                   asset_pack[category ?? weapon_type ?? damage_type]
//! 7  nothing to play
//! ```

use crate::descriptor::AnimationDescriptor;
use crate::overrides::Overrides;
use crate::tables::{MappingTables, UNCATEGORIZED, type_key};
use crate::weapon::WeaponInfo;

/// Asset-pack descriptors always play at unit scale.
const ASSET_PACK_SCALE: f64 = 1.0;

/// Which tier produced a descriptor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Tier {
    ItemOverride,
    CustomMapping,
    Category,
    WeaponType,
    UncategorizedFallback,
    DamageType,
    AssetPack,
}

/// A descriptor together with the tier that produced it.
#[derive(Clone, Debug, PartialEq)]
pub struct Resolution {
    pub tier: Tier,
    pub descriptor: AnimationDescriptor,
}

/// Resolves weapons against a fixed set of mapping tables.
#[derive(Clone, Copy, Debug)]
pub struct Resolver<'a> {
    tables: &'a MappingTables,
}

impl<'a> Resolver<'a> {
    pub fn new(tables: &'a MappingTables) -> Self {
        Self { tables }
    }

    /// Returns the descriptor to play, or `None` when nothing matches.
    pub fn resolve(
        &self,
        info: &WeaponInfo,
        overrides: &Overrides,
        asset_pack_active: bool,
    ) -> Option<AnimationDescriptor> {
        self.resolve_with_tier(info, overrides, asset_pack_active)
            .map(|resolution| resolution.descriptor)
    }

    pub fn resolve_with_tier(
        &self,
        info: &WeaponInfo,
        overrides: &Overrides,
        asset_pack_active: bool,
    ) -> Option<Resolution> {
        let category = info.weapon_category.as_deref();
        let weapon_type = info.weapon_type.as_deref();
        let damage_type = info.primary_damage_type.as_deref();
        let hit = |tier, descriptor: &AnimationDescriptor| {
            Some(Resolution {
                tier,
                descriptor: descriptor.clone(),
            })
        };

        if let Some(descriptor) = info
            .item_id
            .as_deref()
            .and_then(|id| overrides.items.get(id))
            .and_then(|entry| entry.to_descriptor(info))
        {
            return Some(Resolution {
                tier: Tier::ItemOverride,
                descriptor,
            });
        }

        let custom = category
            .and_then(|c| overrides.custom.get(c))
            .and_then(|entry| entry.to_descriptor(info))
            .or_else(|| {
                weapon_type
                    .and_then(|t| overrides.custom.get(&type_key(t)))
                    .and_then(|entry| entry.to_descriptor(info))
            });
        if let Some(descriptor) = custom {
            return Some(Resolution {
                tier: Tier::CustomMapping,
                descriptor,
            });
        }

        let uncategorized = category == Some(UNCATEGORIZED);
        if !uncategorized
            && let Some(descriptor) = category.and_then(|c| self.tables.category(c))
        {
            return hit(Tier::Category, descriptor);
        }

        if let Some(descriptor) = weapon_type.and_then(|t| self.tables.weapon_type(t)) {
            return hit(Tier::WeaponType, descriptor);
        }

        if uncategorized && let Some(descriptor) = self.tables.category(UNCATEGORIZED) {
            return hit(Tier::UncategorizedFallback, descriptor);
        }

        if let Some(descriptor) = damage_type.and_then(|d| self.tables.damage_type(d)) {
            return hit(Tier::DamageType, descriptor);
        }

        if asset_pack_active {
            return self.asset_pack_fallback(info);
        }

        None
    }

    /// Synthesizes a direct-asset descriptor from the asset-pack table.
    ///
    /// The lookup key is the first present field, not the first field with a
    /// table entry: a category without an asset does not fall through to the
    /// weapon type.
    fn asset_pack_fallback(&self, info: &WeaponInfo) -> Option<Resolution> {
        let key = info
            .weapon_category
            .as_deref()
            .or(info.weapon_type.as_deref())
            .or(info.primary_damage_type.as_deref())?;
        let asset = self.tables.asset_pack_asset(key)?;

        let mode = info.attack_mode();
        let descriptor = AnimationDescriptor::direct_asset(
            asset,
            None,
            mode,
            ASSET_PACK_SCALE,
            mode.default_speed(),
        )
        .ok()?;

        Some(Resolution {
            tier: Tier::AssetPack,
            descriptor,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::DescriptorSource;
    use crate::overrides::{CustomMappings, ItemOverrides, OverrideEntry};
    use crate::weapon::AttackMode;

    fn script(path: &str, mode: AttackMode) -> AnimationDescriptor {
        AnimationDescriptor::script(path, mode, 1.0, 800.0).unwrap()
    }

    fn tables() -> MappingTables {
        let mut tables = MappingTables::new();
        tables
            .categories
            .insert("laser".into(), script("laser.js", AttackMode::Ranged));
        tables
            .categories
            .insert(UNCATEGORIZED.into(), script("generic.js", AttackMode::Ranged));
        tables
            .weapon_types
            .insert("basicM".into(), script("basic_melee.js", AttackMode::Melee));
        tables
            .damage_types
            .insert("fire".into(), script("flame.js", AttackMode::Ranged));
        tables
            .asset_pack
            .insert("shock".into(), "jb2a.chain_lightning.primary.blue".into());
        tables
            .asset_pack
            .insert("advancedM".into(), "jb2a.melee_generic.slash.02.orange".into());
        tables
    }

    fn info(category: Option<&str>, weapon_type: Option<&str>, damage: Option<&str>) -> WeaponInfo {
        WeaponInfo {
            weapon_category: category.map(str::to_string),
            weapon_type: weapon_type.map(str::to_string),
            primary_damage_type: damage.map(str::to_string),
            item_id: Some("Item.1".into()),
            ..WeaponInfo::unknown()
        }
    }

    fn tier(info: &WeaponInfo, overrides: &Overrides, pack: bool) -> Option<Tier> {
        let tables = tables();
        Resolver::new(&tables)
            .resolve_with_tier(info, overrides, pack)
            .map(|r| r.tier)
    }

    #[test]
    fn category_tier() {
        let tables = tables();
        let resolved = Resolver::new(&tables)
            .resolve(&info(Some("laser"), Some("basicM"), Some("fire")), &Overrides::default(), false)
            .unwrap();
        assert_eq!(resolved.source, DescriptorSource::Script("laser.js".into()));
    }

    #[test]
    fn uncategorized_defers_to_weapon_type() {
        let got = tier(&info(Some(UNCATEGORIZED), Some("basicM"), None), &Overrides::default(), false);
        assert_eq!(got, Some(Tier::WeaponType));
    }

    #[test]
    fn uncategorized_fallback_before_damage_type() {
        let got = tier(&info(Some(UNCATEGORIZED), Some("longA"), Some("fire")), &Overrides::default(), false);
        assert_eq!(got, Some(Tier::UncategorizedFallback));
    }

    #[test]
    fn unknown_category_falls_to_damage_type() {
        let got = tier(&info(Some("plasma"), None, Some("fire")), &Overrides::default(), false);
        assert_eq!(got, Some(Tier::DamageType));
    }

    #[test]
    fn custom_category_beats_defaults() {
        let mut custom = CustomMappings::new();
        custom.insert(
            "laser",
            OverrideEntry {
                animation: Some("my.laser".into()),
                ..Default::default()
            },
        );
        let overrides = Overrides::new(custom, ItemOverrides::new());
        let got = tier(&info(Some("laser"), None, None), &overrides, false);
        assert_eq!(got, Some(Tier::CustomMapping));
    }

    #[test]
    fn custom_type_key_applies() {
        let mut custom = CustomMappings::new();
        custom.insert(
            type_key("basicM"),
            OverrideEntry {
                animation: Some("my.slash".into()),
                ..Default::default()
            },
        );
        let overrides = Overrides::new(custom, ItemOverrides::new());
        let got = tier(&info(Some(UNCATEGORIZED), Some("basicM"), None), &overrides, false);
        assert_eq!(got, Some(Tier::CustomMapping));
    }

    #[test]
    fn unplayable_override_falls_through() {
        let mut items = ItemOverrides::new();
        items.insert(
            "Item.1",
            OverrideEntry {
                scale: Some(2.0),
                ..Default::default()
            },
        );
        let overrides = Overrides::new(CustomMappings::new(), items);
        let got = tier(&info(Some("laser"), None, None), &overrides, false);
        assert_eq!(got, Some(Tier::Category));
    }

    #[test]
    fn asset_pack_only_when_active() {
        let shock = info(Some("shock"), None, None);
        assert_eq!(tier(&shock, &Overrides::default(), false), None);

        let tables = tables();
        let resolved = Resolver::new(&tables)
            .resolve_with_tier(&shock, &Overrides::default(), true)
            .unwrap();
        assert_eq!(resolved.tier, Tier::AssetPack);
        assert_eq!(resolved.descriptor.mode, AttackMode::Ranged);
        assert_eq!(resolved.descriptor.scale, 1.0);
        assert_eq!(resolved.descriptor.speed, 800.0);
    }

    #[test]
    fn asset_pack_melee_speed() {
        let tables = tables();
        let resolved = Resolver::new(&tables)
            .resolve(&info(None, Some("advancedM"), None), &Overrides::default(), true)
            .unwrap();
        assert_eq!(resolved.mode, AttackMode::Melee);
        assert_eq!(resolved.speed, 300.0);
    }

    #[test]
    fn asset_pack_key_is_first_present_field() {
        // "sonic" has no asset; the weapon type is never consulted.
        let got = tier(&info(Some("sonic"), Some("advancedM"), None), &Overrides::default(), true);
        assert_eq!(got, None);
    }

    #[test]
    fn lookups_are_case_sensitive() {
        let got = tier(&info(Some("Laser"), Some("BasicM"), Some("Fire")), &Overrides::default(), false);
        assert_eq!(got, None);
    }
}
