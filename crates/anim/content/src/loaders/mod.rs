//! Content loaders for reading animation data from files.
//!
//! Each loader parses a RON file into the types defined in `anim-core` or this
//! crate and validates it before handing it out. The default data ships inside
//! the binary and is available through the `embedded` constructors.

pub mod scripts;
pub mod tables;

pub use scripts::ScriptCatalogLoader;
pub use tables::TablesLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
