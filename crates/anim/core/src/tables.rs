//! Built-in mapping tables consulted by the resolution chain.

use std::collections::HashMap;

use thiserror::Error;

use crate::descriptor::{AnimationDescriptor, DescriptorError};

/// Category sentinel that resolution defers until after the weapon-type tier.
pub const UNCATEGORIZED: &str = "uncategorized";

/// Prefix distinguishing weapon-type keys from category keys in custom mappings.
pub const TYPE_KEY_PREFIX: &str = "type_";

/// Custom-mapping key for a weapon type.
pub fn type_key(weapon_type: &str) -> String {
    format!("{TYPE_KEY_PREFIX}{weapon_type}")
}

#[derive(Debug, Error)]
#[error("invalid {table} entry `{key}`: {source}")]
pub struct TableError {
    pub table: &'static str,
    pub key: String,
    #[source]
    pub source: DescriptorError,
}

/// Read-only descriptor tables keyed by category, weapon type and damage type,
/// plus the community asset-pack name → asset id table.
///
/// Lookups are exact and case-sensitive.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MappingTables {
    #[cfg_attr(feature = "serde", serde(default))]
    pub categories: HashMap<String, AnimationDescriptor>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub weapon_types: HashMap<String, AnimationDescriptor>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub damage_types: HashMap<String, AnimationDescriptor>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub asset_pack: HashMap<String, String>,
}

impl MappingTables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(&self, key: &str) -> Option<&AnimationDescriptor> {
        self.categories.get(key)
    }

    pub fn weapon_type(&self, key: &str) -> Option<&AnimationDescriptor> {
        self.weapon_types.get(key)
    }

    pub fn damage_type(&self, key: &str) -> Option<&AnimationDescriptor> {
        self.damage_types.get(key)
    }

    pub fn asset_pack_asset(&self, key: &str) -> Option<&str> {
        self.asset_pack.get(key).map(String::as_str)
    }

    /// Validates every descriptor in every table.
    pub fn validate(&self) -> Result<(), TableError> {
        let tables = [
            ("categories", &self.categories),
            ("weapon_types", &self.weapon_types),
            ("damage_types", &self.damage_types),
        ];

        for (table, entries) in tables {
            for (key, descriptor) in entries {
                descriptor.validate().map_err(|source| TableError {
                    table,
                    key: key.clone(),
                    source,
                })?;
            }
        }

        Ok(())
    }
}
