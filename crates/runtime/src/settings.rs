//! Typed access to the host's flat key/value settings store.
//!
//! The store only speaks string keys and JSON values. [`EngineSettings`] is a
//! per-event snapshot with defaults filled in and multipliers clamped, and
//! the override maps are decoded from their JSON-string form here so a corrupt
//! value degrades to "no overrides" instead of failing the attack.
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use anim_core::{CustomMappings, ItemOverrides, OverrideEntry, Overrides, WeaponInfo};

pub const ENABLED: &str = "enabled";
pub const ONLY_ON_HIT: &str = "onlyOnHit";
pub const MISS_ANIMATION: &str = "missAnimation";
pub const ANIMATION_SCALE: &str = "animationScale";
pub const ANIMATION_SPEED: &str = "animationSpeed";
pub const SOUND_ENABLED: &str = "soundEnabled";
pub const SOUND_VOLUME: &str = "soundVolume";
pub const DEBUG_MODE: &str = "debugMode";
pub const CUSTOM_MAPPINGS: &str = "customMappings";
pub const ITEM_OVERRIDES: &str = "itemOverrides";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("settings store rejected {key}: {message}")]
pub struct SettingsError {
    pub key: String,
    pub message: String,
}

/// Flat get/set contract the engine needs from settings persistence.
pub trait SettingsStore: Send + Sync {
    fn get(&self, key: &str) -> Option<Value>;

    fn set(&self, key: &str, value: Value) -> Result<(), SettingsError>;
}

/// Process-local store, used by tests and the scenario client.
#[derive(Debug, Default)]
pub struct InMemorySettings {
    values: Mutex<HashMap<String, Value>>,
}

impl InMemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_values(values: impl IntoIterator<Item = (String, Value)>) -> Self {
        Self {
            values: Mutex::new(values.into_iter().collect()),
        }
    }
}

impl SettingsStore for InMemorySettings {
    fn get(&self, key: &str) -> Option<Value> {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: Value) -> Result<(), SettingsError> {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value);
        Ok(())
    }
}

/// Scalar settings with defaults applied.
#[derive(Clone, Debug, PartialEq)]
pub struct EngineSettings {
    pub enabled: bool,
    pub only_on_hit: bool,
    pub miss_animation: bool,
    pub animation_scale: f64,
    pub animation_speed: f64,
    pub sound_enabled: bool,
    pub sound_volume: f64,
    pub debug_mode: bool,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            only_on_hit: false,
            miss_animation: true,
            animation_scale: 1.0,
            animation_speed: 1.0,
            sound_enabled: true,
            sound_volume: 0.5,
            debug_mode: false,
        }
    }
}

impl EngineSettings {
    pub fn load(store: &dyn SettingsStore) -> Self {
        let defaults = Self::default();
        let flag = |key, default| store.get(key).and_then(|v| v.as_bool()).unwrap_or(default);
        let number = |key, default, min: f64, max: f64| {
            store
                .get(key)
                .and_then(|v| v.as_f64())
                .filter(|n| n.is_finite())
                .map_or(default, |n: f64| n.clamp(min, max))
        };

        Self {
            enabled: flag(ENABLED, defaults.enabled),
            only_on_hit: flag(ONLY_ON_HIT, defaults.only_on_hit),
            miss_animation: flag(MISS_ANIMATION, defaults.miss_animation),
            animation_scale: number(ANIMATION_SCALE, defaults.animation_scale, 0.1, 3.0),
            animation_speed: number(ANIMATION_SPEED, defaults.animation_speed, 0.25, 3.0),
            sound_enabled: flag(SOUND_ENABLED, defaults.sound_enabled),
            sound_volume: number(SOUND_VOLUME, defaults.sound_volume, 0.0, 1.0),
            debug_mode: flag(DEBUG_MODE, defaults.debug_mode),
        }
    }
}

/// Decodes both override maps; an unparsable map is treated as empty.
pub fn load_overrides(store: &dyn SettingsStore) -> Overrides {
    let custom = read_map(store, CUSTOM_MAPPINGS, CustomMappings::from_json);
    let items = read_map(store, ITEM_OVERRIDES, ItemOverrides::from_json);
    Overrides::new(custom, items)
}

fn read_map<T: Default>(
    store: &dyn SettingsStore,
    key: &str,
    parse: impl Fn(&str) -> Result<T, serde_json::Error>,
) -> T {
    let Some(raw) = store.get(key) else {
        return T::default();
    };
    let Some(raw) = raw.as_str() else {
        warn!(target: "runtime::settings", key, "override map is not a JSON string, ignoring");
        return T::default();
    };
    parse(raw).unwrap_or_else(|error| {
        warn!(target: "runtime::settings", key, %error, "failed to parse override map, ignoring");
        T::default()
    })
}

/// Stores a per-item override keyed by the item's stable id.
///
/// Returns `false` without writing when the item has no id to key by.
pub fn set_item_override(
    store: &dyn SettingsStore,
    info: &WeaponInfo,
    mut entry: OverrideEntry,
) -> Result<bool, SettingsError> {
    let Some(item_id) = info.item_id.as_deref() else {
        return Ok(false);
    };
    entry.item_name.get_or_insert_with(|| info.item_name.clone());

    let mut items = read_map(store, ITEM_OVERRIDES, ItemOverrides::from_json);
    items.insert(item_id, entry);
    store.set(ITEM_OVERRIDES, Value::String(items.to_json()))?;
    Ok(true)
}

/// Removes a per-item override. Returns whether one was present.
pub fn clear_item_override(store: &dyn SettingsStore, item_id: &str) -> Result<bool, SettingsError> {
    let mut items = read_map(store, ITEM_OVERRIDES, ItemOverrides::from_json);
    if items.remove(item_id).is_none() {
        return Ok(false);
    }
    store.set(ITEM_OVERRIDES, Value::String(items.to_json()))?;
    Ok(true)
}
