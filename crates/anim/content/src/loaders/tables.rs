//! Mapping table loader.

use std::path::Path;

use anim_core::MappingTables;

use crate::loaders::{LoadResult, read_file};

const EMBEDDED_TABLES: &str = include_str!("../../data/tables.ron");

/// Loader for the built-in mapping tables.
pub struct TablesLoader;

impl TablesLoader {
    /// Load mapping tables from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing MappingTables
    pub fn load(path: &Path) -> LoadResult<MappingTables> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Tables compiled into the crate.
    pub fn embedded() -> LoadResult<MappingTables> {
        Self::parse(EMBEDDED_TABLES)
    }

    /// Parse and validate mapping tables from RON text.
    pub fn parse(content: &str) -> LoadResult<MappingTables> {
        let tables: MappingTables = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse mapping tables RON: {}", e))?;
        tables.validate()?;

        Ok(tables)
    }
}
