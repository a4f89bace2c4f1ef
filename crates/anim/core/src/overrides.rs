//! User-authored override entries and the two persisted override maps.
//!
//! Both maps are stored as JSON objects in the external settings store. Entries
//! are loosely shaped because they were written by different editor versions:
//!
//! ```text
//! { "macro": "Qx81...", "scale": 1.2, "speed": 600, "type": "melee", "itemName": "Doshko" }
//! { "animation": "jb2a.bullet.01.orange", "sound": "sfx/shot.ogg", "scale": 0.8 }
//! { "script": "animations/custom/railgun.js" }
//! ```
//!
//! The item map is keyed by a stable item identifier; the custom map is keyed
//! by category, or by `type_<weaponType>` for weapon-type entries.

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::descriptor::{AnimationDescriptor, DescriptorSource, is_positive};
use crate::weapon::{AttackMode, WeaponInfo};

/// Scale applied when an entry omits one or carries a non-positive value.
pub const DEFAULT_OVERRIDE_SCALE: f64 = 1.0;
/// Speed applied when an entry omits one or carries a non-positive value.
pub const DEFAULT_OVERRIDE_SPEED: f64 = 800.0;

/// One raw override entry as persisted.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OverrideEntry {
    pub macro_ref: Option<String>,
    pub script: Option<String>,
    pub animation: Option<String>,
    pub sound: Option<String>,
    pub mode: Option<AttackMode>,
    pub scale: Option<f64>,
    pub speed: Option<f64>,
    pub item_name: Option<String>,
}

impl OverrideEntry {
    pub fn from_value(value: &Value) -> Self {
        let text = |key: &str| {
            value
                .get(key)
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        let number = |key: &str| value.get(key).and_then(Value::as_f64);

        Self {
            macro_ref: text("macro"),
            script: text("script"),
            animation: text("animation"),
            sound: text("sound"),
            mode: text("type").and_then(|t| t.parse().ok()),
            scale: number("scale"),
            speed: number("speed"),
            item_name: text("itemName"),
        }
    }

    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        let mut put = |key: &str, value: Option<Value>| {
            if let Some(value) = value {
                map.insert(key.to_string(), value);
            }
        };

        put("macro", self.macro_ref.clone().map(Value::from));
        put("script", self.script.clone().map(Value::from));
        put("animation", self.animation.clone().map(Value::from));
        put("sound", self.sound.clone().map(Value::from));
        put("type", self.mode.map(|m| Value::from(m.to_string())));
        put("scale", self.scale.map(Value::from));
        put("speed", self.speed.map(Value::from));
        put("itemName", self.item_name.clone().map(Value::from));

        Value::Object(map)
    }

    /// Builds a descriptor for `info`, or `None` when the entry names nothing to play.
    ///
    /// Precedence is macro, then script, then direct asset.
    pub fn to_descriptor(&self, info: &WeaponInfo) -> Option<AnimationDescriptor> {
        let source = if let Some(reference) = &self.macro_ref {
            DescriptorSource::Macro(reference.clone())
        } else if let Some(path) = &self.script {
            DescriptorSource::Script(path.clone())
        } else if let Some(animation) = &self.animation {
            DescriptorSource::DirectAsset {
                animation: animation.clone(),
                sound: self.sound.clone(),
            }
        } else {
            return None;
        };

        let mode = self.mode.unwrap_or_else(|| info.attack_mode());
        let scale = self
            .scale
            .filter(|s| is_positive(*s))
            .unwrap_or(DEFAULT_OVERRIDE_SCALE);
        let speed = self
            .speed
            .filter(|s| is_positive(*s))
            .unwrap_or(DEFAULT_OVERRIDE_SPEED);

        AnimationDescriptor::new(source, mode, scale, speed).ok()
    }
}

macro_rules! override_map {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Default, PartialEq)]
        pub struct $name {
            entries: HashMap<String, OverrideEntry>,
        }

        impl $name {
            pub fn new() -> Self {
                Self::default()
            }

            /// Parses the persisted JSON object. An empty string is an empty map.
            pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
                if raw.trim().is_empty() {
                    return Ok(Self::default());
                }
                let object: Map<String, Value> = serde_json::from_str(raw)?;
                let entries = object
                    .iter()
                    .map(|(key, value)| (key.clone(), OverrideEntry::from_value(value)))
                    .collect();
                Ok(Self { entries })
            }

            pub fn to_json(&self) -> String {
                let object: Map<String, Value> = self
                    .entries
                    .iter()
                    .map(|(key, entry)| (key.clone(), entry.to_value()))
                    .collect();
                Value::Object(object).to_string()
            }

            pub fn get(&self, key: &str) -> Option<&OverrideEntry> {
                self.entries.get(key)
            }

            pub fn insert(&mut self, key: impl Into<String>, entry: OverrideEntry) {
                self.entries.insert(key.into(), entry);
            }

            pub fn remove(&mut self, key: &str) -> Option<OverrideEntry> {
                self.entries.remove(key)
            }

            pub fn len(&self) -> usize {
                self.entries.len()
            }

            pub fn is_empty(&self) -> bool {
                self.entries.is_empty()
            }
        }

        impl FromIterator<(String, OverrideEntry)> for $name {
            fn from_iter<I: IntoIterator<Item = (String, OverrideEntry)>>(iter: I) -> Self {
                Self {
                    entries: iter.into_iter().collect(),
                }
            }
        }
    };
}

override_map!(
    /// Per-category custom mappings, keyed by category or `type_<weaponType>`.
    CustomMappings
);

override_map!(
    /// Per-item overrides, keyed by stable item identifier.
    ItemOverrides
);

/// Both user-editable override stores, as read for one resolution.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Overrides {
    pub custom: CustomMappings,
    pub items: ItemOverrides,
}

impl Overrides {
    pub fn new(custom: CustomMappings, items: ItemOverrides) -> Self {
        Self { custom, items }
    }
}
