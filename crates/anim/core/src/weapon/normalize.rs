//! Item record → [`WeaponInfo`] extraction.
//!
//! Item records reach the engine as loosely-shaped JSON. Three encodings of the
//! first damage part have accumulated over system versions:
//!
//! ```text
//! ["1d6", "fire"]                              tuple of formula and type
//! { "formula": "1d6", "types": { "fire": true } }   map of boolean flags
//! "fire"                                       bare type string
//! ```
//!
//! Anything else yields no damage type. Extraction is total: it never fails and
//! never panics, whatever the record looks like.

use serde_json::Value;

use super::{UNKNOWN_ITEM_NAME, WeaponInfo};

/// Extracts canonical weapon metadata from an optional item record.
pub fn extract_weapon_info(item: Option<&Value>) -> WeaponInfo {
    let Some(item) = item else {
        return WeaponInfo::unknown();
    };

    let item_name = string_field(item, "name").unwrap_or_else(|| UNKNOWN_ITEM_NAME.to_string());

    let Some(system) = item.get("system").filter(|s| s.is_object()) else {
        return WeaponInfo {
            item_name,
            ..WeaponInfo::unknown()
        };
    };

    WeaponInfo {
        weapon_category: string_field(system, "weaponCategory"),
        weapon_type: string_field(system, "weaponType"),
        action_type: string_field(system, "actionType"),
        primary_damage_type: primary_damage_type(system),
        item_id: string_field(item, "uuid").or_else(|| string_field(item, "id")),
        item_name,
    }
}

fn string_field(value: &Value, key: &str) -> Option<String> {
    value.get(key)?.as_str().map(str::to_string)
}

fn primary_damage_type(system: &Value) -> Option<String> {
    let first = system.get("damage")?.get("parts")?.as_array()?.first()?;

    match first {
        Value::Array(tuple) => tuple.get(1)?.as_str().map(str::to_string),
        Value::Object(part) => part
            .get("types")?
            .as_object()?
            .iter()
            .find(|(_, flag)| flag.as_bool() == Some(true))
            .map(|(name, _)| name.clone()),
        Value::String(kind) => Some(kind.clone()),
        _ => None,
    }
}
