//! Pure weapon-to-animation resolution rules shared by the runtime and tools.
//!
//! `anim-core` turns a heterogeneous item record into a canonical
//! [`WeaponInfo`], resolves it through the tiered [`Resolver`] to an
//! [`AnimationDescriptor`], and defines the [`Sequence`] builder that animation
//! scripts and the playback composer fill in. Nothing in this crate performs
//! I/O or awaits; the runtime owns every side effect.
pub mod descriptor;
pub mod geometry;
pub mod overrides;
pub mod resolver;
pub mod script;
pub mod sequence;
pub mod tables;
pub mod weapon;

pub use descriptor::{AnimationDescriptor, DescriptorError, DescriptorKind, DescriptorSource};
pub use geometry::{Point, miss_offset};
pub use overrides::{CustomMappings, ItemOverrides, OverrideEntry, Overrides};
pub use resolver::{Resolution, Resolver, Tier};
pub use script::{AnimationContext, AnimationScript, ScriptError};
pub use sequence::{EffectSpec, Sequence, SequenceStep, SoundSpec, TokenRef};
pub use tables::{MappingTables, TYPE_KEY_PREFIX, TableError, UNCATEGORIZED, type_key};
pub use weapon::{AttackMode, UNKNOWN_ITEM_NAME, WeaponInfo, extract_weapon_info};
