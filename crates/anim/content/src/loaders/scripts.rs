//! Bundled script catalog loader.

use std::path::Path;

use crate::loaders::{LoadResult, read_file};
use crate::scripts::ScriptCatalog;

const EMBEDDED_SCRIPTS: &str = include_str!("../../data/scripts.ron");

/// Loader for the bundled animation-script catalog.
pub struct ScriptCatalogLoader;

impl ScriptCatalogLoader {
    /// Load a script catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<ScriptCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Catalog compiled into the crate.
    pub fn embedded() -> LoadResult<ScriptCatalog> {
        Self::parse(EMBEDDED_SCRIPTS)
    }

    pub fn parse(content: &str) -> LoadResult<ScriptCatalog> {
        let catalog: ScriptCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse script catalog RON: {}", e))?;

        for (path, script) in &catalog.scripts {
            if script.file.trim().is_empty() {
                anyhow::bail!("Bundled script {} has no asset file", path);
            }
            if !(0.0..=1.0).contains(&script.miss_opacity) {
                anyhow::bail!(
                    "Bundled script {} has miss opacity {} outside 0..=1",
                    path,
                    script.miss_opacity
                );
            }
        }

        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loaders::TablesLoader;
    use crate::scripts::MissStyle;
    use anim_core::DescriptorSource;

    #[test]
    fn embedded_catalog_loads() {
        let catalog = ScriptCatalogLoader::embedded().unwrap();
        assert_eq!(catalog.len(), 16);

        let melee = catalog.get("animations/melee/basic_melee.js").unwrap();
        assert_eq!(melee.miss_style, MissStyle::RandomRotation);
        assert_eq!(melee.miss_opacity, 0.4);
    }

    #[test]
    fn unshipped_table_scripts_are_absent() {
        let catalog = ScriptCatalogLoader::embedded().unwrap();
        let tables = TablesLoader::embedded().unwrap();

        let missing: Vec<&str> = tables
            .categories
            .values()
            .chain(tables.weapon_types.values())
            .chain(tables.damage_types.values())
            .filter_map(|d| match &d.source {
                DescriptorSource::Script(path) => Some(path.as_str()),
                _ => None,
            })
            .filter(|path| catalog.get(path).is_none())
            .collect();

        assert_eq!(missing.len(), 2);
        assert!(missing.contains(&"animations/projectile/small_arms.js"));
        assert!(missing.contains(&"animations/projectile/heavy.js"));
    }

    #[test]
    fn rejects_opacity_out_of_range() {
        let bad = r#"(scripts: { "x.js": (file: "a", miss_opacity: 1.5) })"#;
        assert!(ScriptCatalogLoader::parse(bad).is_err());
    }
}
