//! Data-driven animation content and loaders.
//!
//! This crate houses the static content the engine resolves against:
//! - Default category / weapon-type / damage-type descriptor tables (RON)
//! - The community asset-pack fallback table (RON)
//! - The bundled animation-script catalog (RON)
//!
//! Content is read-only once loaded and is consumed by the runtime through
//! [`anim_core::MappingTables`] and [`BundledScript`] producers.

pub mod scripts;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use scripts::{BundledScript, MissStyle, ScriptCatalog};

#[cfg(feature = "loaders")]
pub use loaders::{ScriptCatalogLoader, TablesLoader};
